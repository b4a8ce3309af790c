//! Serial console handler
//!
//! Writes one line per event:
//!
//! ```text
//! <sec>.<msec>:<level>:<device id>:<tag>:<message>
//! ```
//!
//! e.g. `12.034:20:e32-a1b2c3:wifi:connected`, optionally wrapped in ANSI
//! colors chosen by severity.

use core::cell::{Ref, RefCell};

use super::LogHandler;
use crate::buffer::{MESSAGE_BUFFER_LEN, MessageBuffer};
use crate::color::Colorizer;
use crate::config::SerialConfig;
use crate::error::LogError;
use crate::event::LogEvent;
use crate::time::TimeProvider;
use crate::transport::ConsoleIo;

/// Capacity of the buffer a console line is rendered into
pub const LINE_BUFFER_LEN: usize = MESSAGE_BUFFER_LEN + 128;

/// Handler writing human-readable lines to a serial console
pub struct SerialHandler<C: ConsoleIo, T: TimeProvider> {
    io: RefCell<C>,
    clock: T,
    colors: Colorizer,
}

impl<C: ConsoleIo, T: TimeProvider> SerialHandler<C, T> {
    /// Create a serial handler
    ///
    /// When `config.baud_rate` is non-zero the console is brought up at that
    /// rate first; zero means it is already initialized. A failing bring-up is
    /// not fatal, the handler simply keeps trying to write.
    pub fn new(config: &SerialConfig, mut io: C, clock: T) -> Self {
        if config.baud_rate != 0 {
            if let Err(err) = io.begin(config.baud_rate) {
                log::debug!("SerialHandler: console bring-up at {} baud failed: {}", config.baud_rate, err);
            }
        }
        Self {
            io: RefCell::new(io),
            clock,
            colors: Colorizer::new(config.color),
        }
    }

    /// Borrow the underlying console
    ///
    /// Panics if called from inside a write to this handler.
    pub fn io(&self) -> Ref<'_, C> {
        self.io.borrow()
    }

    pub fn clock(&self) -> &T {
        &self.clock
    }

    pub fn colors(&self) -> Colorizer {
        self.colors
    }
}

impl<C: ConsoleIo, T: TimeProvider> LogHandler for SerialHandler<C, T> {
    fn write(&self, event: &LogEvent<'_>) -> Result<(), LogError> {
        let ms = self.clock.now_ms();
        let mut line = MessageBuffer::<LINE_BUFFER_LEN>::new();
        line.write_args(format_args!(
            "{}{}.{:03}:{:02}:{}:{}:{}",
            self.colors.start(event.level),
            ms / 1000,
            ms % 1000,
            event.level.raw(),
            event.device_id.unwrap_or(""),
            event.tag,
            event.message,
        ));
        // A truncated line still ends with the reset and the line break
        line.terminate(self.colors.end_line());

        let mut io = self.io.try_borrow_mut().map_err(|_| LogError::Busy)?;
        io.write_bytes(line.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::{rc::Rc, string::String};
    use core::cell::{Cell, RefCell};

    use super::*;
    use crate::error::TransportError;
    use crate::level::LogLevel;
    use crate::logger::LoggerTree;
    use crate::time::ManualClock;
    use crate::transport::MemoryConsole;

    fn handler(color: bool, baud_rate: u32) -> SerialHandler<MemoryConsole, ManualClock> {
        SerialHandler::new(
            &SerialConfig { color, baud_rate },
            MemoryConsole::new(),
            ManualClock::new(12_034),
        )
    }

    #[test]
    fn test_plain_line() {
        let serial = handler(false, 0);
        let event = LogEvent::new(LogLevel::INFO, Some("e32-a1b2c3"), "wifi", "connected");
        serial.write(&event).unwrap();
        assert_eq!(serial.io().output_str(), "12.034:20:e32-a1b2c3:wifi:connected\n");
    }

    #[test]
    fn test_missing_device_id_is_empty() {
        let serial = handler(false, 0);
        serial
            .write(&LogEvent::new(LogLevel::from_raw(5), None, "main", "boot"))
            .unwrap();
        assert_eq!(serial.io().output_str(), "12.034:05::main:boot\n");
    }

    #[test]
    fn test_colored_line() {
        let serial = handler(true, 0);
        serial
            .write(&LogEvent::new(LogLevel::ERROR, None, "adc", "overrun"))
            .unwrap();
        assert_eq!(
            serial.io().output_str(),
            "\x1b[31m12.034:40::adc:overrun\x1b[0m\n"
        );
    }

    #[test]
    fn test_baud_rate_init() {
        assert_eq!(handler(false, 0).io().baud_rate(), None);
        assert_eq!(handler(false, 115_200).io().baud_rate(), Some(115_200));
    }

    #[test]
    fn test_clock_is_read_per_event() {
        let serial = handler(false, 0);
        serial.write(&LogEvent::new(LogLevel::DEBUG, None, "t", "a")).unwrap();
        serial.clock().set_ms(61_005);
        serial.write(&LogEvent::new(LogLevel::DEBUG, None, "t", "b")).unwrap();
        assert_eq!(serial.io().lines(), ["12.034:10::t:a", "61.005:10::t:b"]);
    }

    #[test]
    fn test_console_failure_is_reported() {
        let mut console = MemoryConsole::new();
        console.set_failing(true);
        let serial = SerialHandler::new(&SerialConfig::default(), console, ManualClock::new(0));
        let result = serial.write(&LogEvent::new(LogLevel::INFO, None, "t", "m"));
        assert_eq!(result, Err(LogError::Transport(TransportError::NotReady)));
    }

    #[test]
    fn test_line_is_written_at_once() {
        let serial = handler(true, 0);
        serial
            .write(&LogEvent::new(LogLevel::WARNING, Some("dev"), "bat", "low"))
            .unwrap();
        assert_eq!(serial.io().write_count(), 1);
    }

    #[test]
    fn test_truncated_line_keeps_reset_and_newline() {
        let serial = handler(true, 0);
        let message = "z".repeat(2 * LINE_BUFFER_LEN);
        serial
            .write(&LogEvent::new(LogLevel::ERROR, None, "t", &message))
            .unwrap();

        let output = serial.io().output_str();
        assert_eq!(output.len(), LINE_BUFFER_LEN);
        assert!(output.starts_with("\x1b[31m12.034:40::t:zzz"));
        assert!(output.ends_with("zzz\x1b[0m\n"));
    }

    /// Console that writes to a handler again from inside `write_bytes`
    struct EchoingConsole {
        inner: MemoryConsole,
        target: Rc<RefCell<Option<Rc<dyn LogHandler>>>>,
        nested: Rc<Cell<Option<Result<(), LogError>>>>,
    }

    impl ConsoleIo for EchoingConsole {
        fn write_bytes(&mut self, data: &[u8]) -> Result<(), TransportError> {
            let target = self.target.borrow().clone();
            if let Some(handler) = target {
                let event = LogEvent::new(LogLevel::ERROR, None, "echo", "nested");
                self.nested.set(Some(handler.write(&event)));
            }
            self.inner.write_bytes(data)
        }
    }

    #[test]
    fn test_reentrant_write_is_busy() {
        let target = Rc::new(RefCell::new(None));
        let nested = Rc::new(Cell::new(None));
        let console = EchoingConsole {
            inner: MemoryConsole::new(),
            target: target.clone(),
            nested: nested.clone(),
        };
        let serial = Rc::new(SerialHandler::new(
            &SerialConfig::default(),
            console,
            ManualClock::new(0),
        ));
        let handler: Rc<dyn LogHandler> = serial.clone();
        *target.borrow_mut() = Some(handler);

        let result = serial.write(&LogEvent::new(LogLevel::INFO, None, "main", "outer"));
        // Break the handler -> console -> handler cycle
        target.borrow_mut().take();

        assert_eq!(result, Ok(()));
        assert_eq!(nested.take(), Some(Err(LogError::Busy)));
        let lines: alloc::vec::Vec<String> = serial.io().inner.lines();
        assert_eq!(lines, ["\x1b[32m0.000:20::main:outer\x1b[0m"]);
    }

    #[test]
    fn test_shared_uart_held_by_application() {
        let uart = Rc::new(RefCell::new(MemoryConsole::new()));
        let serial = Rc::new(SerialHandler::new(
            &SerialConfig {
                color: false,
                baud_rate: 0,
            },
            uart.clone(),
            ManualClock::new(0),
        ));
        let tree = LoggerTree::new();
        let root = tree.root("main", Some(serial.clone()));

        let held = uart.borrow_mut();
        root.info(format_args!("dropped while the uart is held"));
        assert_eq!(
            serial.write(&LogEvent::new(LogLevel::INFO, None, "main", "x")),
            Err(LogError::Transport(TransportError::InUse))
        );
        drop(held);

        root.info(format_args!("delivered"));
        assert_eq!(uart.borrow().lines(), ["0.000:20::main:delivered"]);
    }
}

//! Syslog over a real UDP socket on the loopback interface

use std::net::UdpSocket;
use std::rc::Rc;
use std::time::Duration;

use log32_core::time::ManualClock;
use log32_core::{
    LogLevel, LoggerTree, LoggingConfig, ModuleConfig, SyslogConfig, SyslogHandler, bootstrap,
};
use log32_host::{StdoutConsole, SystemClock, UdpDatagram};

fn receiver() -> (UdpSocket, u16) {
    let socket = UdpSocket::bind("127.0.0.1:0").expect("Failed to bind receiver");
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("Failed to set read timeout");
    let port = socket.local_addr().expect("No local address").port();
    (socket, port)
}

fn receive(socket: &UdpSocket) -> String {
    let mut buf = [0u8; 1024];
    let (len, _) = socket.recv_from(&mut buf).expect("No datagram received");
    String::from_utf8_lossy(&buf[..len]).into_owned()
}

#[test_log::test]
fn test_syslog_datagram_over_loopback() {
    // ---------------------------------------------------------------------------------------------
    // Arrange
    //
    let (socket, port) = receiver();
    let config = SyslogConfig {
        host: "127.0.0.1".to_string(),
        port,
        facility: 16,
        color: false,
    };
    let clock = Rc::new(ManualClock::new(83_042));
    clock.set_unix_time_ms(Some(1_714_557_600_250));
    let handler = SyslogHandler::new(&config, UdpDatagram::new(), clock.clone())
        .expect("Valid syslog config");
    let handler = Rc::new(handler);

    let tree = LoggerTree::new();
    let root = tree.root("main", Some(handler.clone()));
    root.set_device_id(Some("e32-a1b2c3"));
    let wifi = root.child("wifi");

    // ---------------------------------------------------------------------------------------------
    // Act
    //
    log32_core::error!(wifi, "association lost ({} retries)", 3);

    // ---------------------------------------------------------------------------------------------
    // Assert
    //
    assert_eq!(
        receive(&socket),
        "<131>1 2024-05-01T10:00:00.250Z e32-a1b2c3 wifi - 83.042 association lost (3 retries)"
    );
    assert!(handler.io().local_addr().is_some());
}

#[test_log::test]
fn test_bootstrap_fans_out_to_syslog() {
    let (socket, port) = receiver();
    let config = LoggingConfig {
        level: LogLevel::INFO,
        syslog: Some(SyslogConfig {
            host: "127.0.0.1".to_string(),
            port,
            ..SyslogConfig::default()
        }),
        modules: vec![ModuleConfig {
            tag: "anotherModule".to_string(),
            level: LogLevel::CRITICAL,
        }],
        ..LoggingConfig::default()
    };

    let setup = bootstrap::from_config(
        &config,
        Some(StdoutConsole::new()),
        Some(UdpDatagram::new()),
        SystemClock::uptime_only(),
    )
    .expect("Valid logging config");
    let module = setup.module("anotherModule").expect("Module logger created");

    log32_core::debug!(setup.root, "dropped by root level");
    log32_core::error!(module, "dropped by module level");
    log32_core::info!(setup.root, "root message");
    log32_core::critical!(module, "module message");

    let first = receive(&socket);
    let second = receive(&socket);
    assert!(first.starts_with("<14>1 - - main - "), "{first}");
    assert!(first.ends_with(" root message"), "{first}");
    assert!(second.starts_with("<10>1 - - anotherModule - "), "{second}");
    assert!(second.ends_with(" module message"), "{second}");
}

#[test_log::test]
fn test_unreachable_host_does_not_disturb_caller() {
    let config = SyslogConfig {
        host: "no-such-host.invalid".to_string(),
        ..SyslogConfig::default()
    };
    let handler = SyslogHandler::new(&config, UdpDatagram::new(), SystemClock::new())
        .expect("Valid syslog config");
    let tree = LoggerTree::new();
    let root = tree.root("main", Some(Rc::new(handler)));

    // Delivery fails inside the handler; the log call still returns normally
    log32_core::critical!(root, "nobody is listening");
    log32_core::critical!(root, "still nobody");
}

#[test_log::test]
fn test_syslog_datagram_to_ipv6_host() {
    let Ok(socket) = UdpSocket::bind("[::1]:0") else {
        log::warn!("IPv6 loopback unavailable, skipping");
        return;
    };
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .expect("Failed to set read timeout");
    let port = socket.local_addr().expect("No local address").port();

    let config = SyslogConfig {
        host: "::1".to_string(),
        port,
        ..SyslogConfig::default()
    };
    let handler = SyslogHandler::new(&config, UdpDatagram::new(), Rc::new(ManualClock::new(0)))
        .expect("Valid syslog config");
    let handler = Rc::new(handler);
    let tree = LoggerTree::new();
    let root = tree.root("main", Some(handler.clone()));

    log32_core::warn!(root, "over v6");

    assert_eq!(receive(&socket), "<12>1 - - main - 0.000 over v6");
    let local = handler.io().local_addr().expect("Socket bound");
    assert!(local.is_ipv6());
}

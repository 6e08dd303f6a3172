//! Service annotation based on well-known port numbers.
//!
//! A static lookup used only to label output; never consulted for control
//! flow.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Static map of well-known ports to service names.
static PORT_SERVICES: LazyLock<HashMap<u16, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert(20, "ftp-data");
    m.insert(21, "ftp");
    m.insert(22, "ssh");
    m.insert(23, "telnet");
    m.insert(25, "smtp");
    m.insert(53, "dns");
    m.insert(69, "tftp");
    m.insert(80, "http");
    m.insert(88, "kerberos");
    m.insert(110, "pop3");
    m.insert(111, "rpcbind");
    m.insert(123, "ntp");
    m.insert(135, "msrpc");
    m.insert(139, "netbios-ssn");
    m.insert(143, "imap");
    m.insert(161, "snmp");
    m.insert(389, "ldap");
    m.insert(443, "https");
    m.insert(445, "microsoft-ds");
    m.insert(465, "smtps");
    m.insert(514, "syslog");
    m.insert(587, "submission");
    m.insert(631, "ipp");
    m.insert(636, "ldaps");
    m.insert(873, "rsync");
    m.insert(993, "imaps");
    m.insert(995, "pop3s");
    m.insert(1080, "socks");
    m.insert(1433, "mssql");
    m.insert(1521, "oracle");
    m.insert(1883, "mqtt");
    m.insert(2049, "nfs");
    m.insert(2375, "docker");
    m.insert(3306, "mysql");
    m.insert(3389, "rdp");
    m.insert(5060, "sip");
    m.insert(5432, "postgresql");
    m.insert(5672, "amqp");
    m.insert(5900, "vnc");
    m.insert(6379, "redis");
    m.insert(8080, "http-proxy");
    m.insert(8443, "https-alt");
    m.insert(9092, "kafka");
    m.insert(9200, "elasticsearch");
    m.insert(11211, "memcached");
    m.insert(27017, "mongodb");

    m
});

/// Look up the probable service name for a given port.
///
/// Returns `None` if the port is not in the well-known services table.
pub fn service_name(port: u16) -> Option<&'static str> {
    PORT_SERVICES.get(&port).copied()
}

/// Service label for a port, `"unknown"` when the port is not recognized.
pub fn describe(port: u16) -> &'static str {
    service_name(port).unwrap_or("unknown")
}

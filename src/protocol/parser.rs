//! Passive-mode reply parsing
//!
//! Decodes `227 Entering Passive Mode (h1,h2,h3,h4,p1,p2).` into the address
//! the data channel must connect to.

use std::net::{Ipv4Addr, SocketAddrV4};

use crate::error::ProtocolError;
use crate::protocol::responses::PASSIVE_MODE;

/// Parses a PASV reply line into the server's data socket address.
///
/// The address is `h1.h2.h3.h4` and the port is `(p1 << 8) | p2`.
pub fn parse_passive_response(line: &str) -> Result<SocketAddrV4, ProtocolError> {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    let malformed = || ProtocolError::MalformedPassiveResponse(trimmed.to_string());

    if !trimmed.starts_with(&PASSIVE_MODE.to_string()) {
        return Err(malformed());
    }

    let open = trimmed.find('(').ok_or_else(malformed)?;
    let close = trimmed[open..].find(')').ok_or_else(malformed)? + open;
    let fields: Vec<&str> = trimmed[open + 1..close].split(',').map(str::trim).collect();
    if fields.len() != 6 {
        return Err(malformed());
    }

    let mut octets = [0u8; 4];
    for (octet, field) in octets.iter_mut().zip(&fields[..4]) {
        *octet = field.parse().map_err(|_| malformed())?;
    }

    let port_part = |field: &str| -> Result<u16, ProtocolError> {
        field
            .parse::<u8>()
            .map(u16::from)
            .map_err(|_| ProtocolError::InvalidPassivePort(trimmed.to_string()))
    };
    let port = (port_part(fields[4])? << 8) | port_part(fields[5])?;

    Ok(SocketAddrV4::new(Ipv4Addr::from(octets), port))
}

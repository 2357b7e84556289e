// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Serial port enumeration backed by the `serialport` crate.

use serialport::{SerialPortInfo, SerialPortType};

use apollo3_common::{Error, PortCandidate, PortKind, PortProbe};

/// Lists the host's serial ports.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerialPortProbe;

impl PortProbe for SerialPortProbe {
    fn candidates(&mut self) -> apollo3_common::Result<Vec<PortCandidate>> {
        let ports = serialport::available_ports().map_err(|e| Error::PortProbe(e.to_string()))?;
        Ok(ports.iter().map(candidate_from).collect())
    }
}

fn candidate_from(info: &SerialPortInfo) -> PortCandidate {
    let kind = match &info.port_type {
        SerialPortType::UsbPort(usb) => PortKind::Usb {
            vid: usb.vid,
            pid: usb.pid,
        },
        SerialPortType::BluetoothPort => PortKind::Bluetooth,
        SerialPortType::PciPort => PortKind::Pci,
        SerialPortType::Unknown => PortKind::Unknown,
    };
    PortCandidate::new(info.port_name.clone(), kind)
}

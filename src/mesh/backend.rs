use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use anyhow::{Context, Result};
use log::{info, warn};

use super::events::{InboundEvent, OutboundRequest, decode_event, encode_request};

pub struct BackendLink {
    events: Receiver<InboundEvent>,
    commands: Sender<OutboundRequest>,
}

impl BackendLink {
    pub fn connect(addr: &str) -> Result<Self> {
        let stream = TcpStream::connect(addr)
            .with_context(|| format!("failed to connect to simulation backend at {addr}"))?;
        let write_stream = stream
            .try_clone()
            .context("failed to clone backend stream for writing")?;
        info!("connected to simulation backend at {addr}");

        let (event_tx, events) = mpsc::channel();
        thread::spawn(move || read_events(stream, event_tx));

        let (commands, command_rx) = mpsc::channel();
        thread::spawn(move || write_requests(write_stream, command_rx));

        Ok(Self { events, commands })
    }

    pub fn try_recv(&self) -> Option<InboundEvent> {
        self.events.try_recv().ok()
    }

    pub fn send(&self, request: OutboundRequest) {
        if self.commands.send(request).is_err() {
            warn!("backend writer is gone; dropping outbound request");
        }
    }
}

fn read_events(stream: TcpStream, events: Sender<InboundEvent>) {
    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(error) => {
                warn!("backend read failed: {error}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match decode_event(&line) {
            Ok(event) => {
                if events.send(event).is_err() {
                    break;
                }
            }
            Err(error) => warn!("{error:#}"),
        }
    }
    info!("backend event stream closed");
}

fn write_requests(mut stream: TcpStream, commands: Receiver<OutboundRequest>) {
    while let Ok(request) = commands.recv() {
        let encoded = match encode_request(&request) {
            Ok(encoded) => encoded,
            Err(error) => {
                warn!("{error:#}");
                continue;
            }
        };

        if let Err(error) = writeln!(stream, "{encoded}") {
            warn!("backend write failed: {error}");
            break;
        }
    }
}

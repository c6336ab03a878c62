//! PCAP/PCAPNG source implementation.
//!
//! Provides a `PacketSource` backed by PCAP or PCAPNG files. File I/O and
//! block parsing stay here; frames leave this module as owned `RawFrame`s.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use parser::PcapFileSource;

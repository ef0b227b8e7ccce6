mod answer;
mod error;
mod header;
mod labels;
mod message;
mod question;

pub use answer::Answer;
pub use error::DnsError;
pub use header::{Header, HEADER_SIZE, OPCODE_QUERY, RCODE_NOT_IMPLEMENTED, RCODE_NO_ERROR};
pub use labels::{read_name, write_name};
pub use message::Message;
pub use question::{Question, CLASS_IN, TYPE_A};

// https://datatracker.ietf.org/doc/html/rfc1035#section-4.2.1
//
// Messages carried by UDP are restricted to 512 bytes (not counting the IP
// or UDP headers).
pub const MAX_MESSAGE_SIZE: usize = 512;

pub fn decode_query(request_bytes: &[u8]) -> Result<Message, DnsError> {
    Message::parse_query(request_bytes)
}

pub fn decode_response(response_bytes: &[u8]) -> Result<Message, DnsError> {
    Message::parse_response(response_bytes)
}

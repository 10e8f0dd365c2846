//! Human-readable dump of a node. Diagnostic only; not part of the wire format.
//!
//! - integers in decimal
//! - printable strings quoted, anything else as `#` + hex
//! - lists as `[ a, b ]`
//! - malformed input as `<invalid: ...>`

use std::fmt;

use malachite::Natural;

use crate::rlp::decode::Node;
use crate::rlp::types::NodeKind;
use crate::utils::is_printable;

impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind() {
            Ok(kind) => kind,
            Err(e) => return write!(f, "<invalid: {}>", e),
        };
        match kind {
            NodeKind::Null => write!(f, "null"),
            NodeKind::Integer(_) => match self.read_int::<Natural>() {
                Ok(v) => write!(f, "{}", v),
                Err(e) => write!(f, "<invalid: {}>", e),
            },
            NodeKind::String => match self.to_bytes_strict() {
                Ok(bytes) if is_printable(bytes) => {
                    write!(f, "\"{}\"", String::from_utf8_lossy(bytes))
                }
                Ok(bytes) => write!(f, "#{}", hex::encode(bytes)),
                Err(e) => write!(f, "<invalid: {}>", e),
            },
            NodeKind::List => {
                let items = match self.to_list_strict() {
                    Ok(items) => items,
                    Err(e) => return write!(f, "<invalid: {}>", e),
                };
                if items.is_empty() {
                    return write!(f, "[]");
                }
                write!(f, "[ ")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, " ]")
            }
        }
    }
}

//! Read/write interest masks for `SET_TRAFFIC_MASK` events.

use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Read/write interest of a session.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TrafficMask: u8 {
        /// Reads are enabled.
        const READ = 0b01;
        /// Writes are enabled.
        const WRITE = 0b10;
    }
}

impl TrafficMask {
    /// Returns `true` if reads are enabled.
    pub fn is_readable(self) -> bool {
        self.contains(TrafficMask::READ)
    }

    /// Returns `true` if writes are enabled.
    pub fn is_writable(self) -> bool {
        self.contains(TrafficMask::WRITE)
    }
}

impl fmt::Display for TrafficMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match (self.is_readable(), self.is_writable()) {
            (true, true) => "all",
            (true, false) => "read",
            (false, true) => "write",
            (false, false) => "none",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TrafficMask::all().to_string(), "all");
        assert_eq!(TrafficMask::READ.to_string(), "read");
        assert_eq!(TrafficMask::WRITE.to_string(), "write");
        assert_eq!(TrafficMask::empty().to_string(), "none");
    }
}

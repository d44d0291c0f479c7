/// Lock command written to the command characteristic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Lock,
    Unlock,
}

impl Command {
    /// Exact, case-sensitive match on the ASCII text; anything else is `None`.
    pub fn parse(value: &[u8]) -> Option<Self> {
        match value {
            b"Lock" => Some(Command::Lock),
            b"Unlock" => Some(Command::Unlock),
            _ => None,
        }
    }
}

/// Per-connection lifecycle: `Connecting -> Open -> Closed`.
///
/// Only `Open` connections receive broadcasts or may submit requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

/// Lifecycle of a one-shot load as seen by its consumer.
///
/// Pending → Ready | Failed | Cancelled; every state but `Pending` is final.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Pending,
    Ready,
    Failed,
    Cancelled,
}

use tokio::sync::oneshot;
use tokio::sync::oneshot::error::TryRecvError;

use crate::error::LoadError;
use crate::request::Request;
use crate::state::LoadState;

type Payload<T> = Result<T, LoadError>;

#[derive(Debug)]
enum Slot<T> {
    Waiting(oneshot::Receiver<Payload<T>>),
    Done(LoadState),
}

/// Consumer side of a one-shot load.
///
/// Completes at most once. Polling is a cheap non-blocking check, suitable
/// for calling every frame. Dropping or cancelling it releases the loader
/// without its result ever being observed.
#[derive(Debug)]
pub struct PendingAsset<T> {
    request: Request,
    url: String,
    slot: Slot<T>,
}

/// Producer side of a one-shot load, held by the loader.
#[derive(Debug)]
pub struct Completion<T> {
    request: Request,
    tx: oneshot::Sender<Payload<T>>,
}

/// Create a linked producer/consumer pair for one load.
pub fn pending_pair<T>(
    request: Request,
    url: impl Into<String>,
) -> (Completion<T>, PendingAsset<T>) {
    let (tx, rx) = oneshot::channel();
    (
        Completion { request, tx },
        PendingAsset {
            request,
            url: url.into(),
            slot: Slot::Waiting(rx),
        },
    )
}

impl<T> PendingAsset<T> {
    pub fn request(&self) -> Request {
        self.request
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> LoadState {
        match &self.slot {
            Slot::Waiting(_) => LoadState::Pending,
            Slot::Done(state) => *state,
        }
    }

    /// Takes the result if the load finished since the last call.
    ///
    /// Returns `None` while pending, after cancellation, and once the result
    /// has already been taken. A loader that disappears without completing
    /// yields [`LoadError::Abandoned`].
    pub fn try_take(&mut self) -> Option<Payload<T>> {
        let Slot::Waiting(rx) = &mut self.slot else {
            return None;
        };

        match rx.try_recv() {
            Ok(Ok(asset)) => {
                self.slot = Slot::Done(LoadState::Ready);
                Some(Ok(asset))
            }
            Ok(Err(e)) => {
                self.slot = Slot::Done(LoadState::Failed);
                Some(Err(e))
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Closed) => {
                self.slot = Slot::Done(LoadState::Failed);
                Some(Err(LoadError::Abandoned {
                    url: self.url.clone(),
                }))
            }
        }
    }

    /// Cancel a still-pending load.
    ///
    /// Returns `true` if the load was pending and is now cancelled.
    pub fn cancel(&mut self) -> bool {
        let Slot::Waiting(rx) = &mut self.slot else {
            return false;
        };
        rx.close();
        self.slot = Slot::Done(LoadState::Cancelled);
        true
    }
}

impl<T> Completion<T> {
    pub fn request(&self) -> Request {
        self.request
    }

    /// Deliver the result. Returns `false` if the consumer already went away.
    pub fn complete(self, result: Payload<T>) -> bool {
        self.tx.send(result).is_ok()
    }

    pub fn is_cancelled(&self) -> bool {
        self.tx.is_closed()
    }

    /// Resolves once the consumer cancels or is dropped.
    pub async fn cancelled(&mut self) {
        self.tx.closed().await
    }
}

#[cfg(test)]
mod tests {
    use super::pending_pair;
    use crate::error::LoadError;
    use crate::request::Request;
    use crate::state::LoadState;

    #[test]
    fn result_is_delivered_exactly_once() {
        let (done, mut pending) = pending_pair::<u32>(Request(7), "car.glb");
        assert_eq!(pending.state(), LoadState::Pending);
        assert!(pending.try_take().is_none());

        assert!(done.complete(Ok(42)));
        assert_eq!(pending.try_take().map(|r| r.ok()), Some(Some(42)));
        assert_eq!(pending.state(), LoadState::Ready);
        assert!(pending.try_take().is_none());
    }

    #[test]
    fn failures_are_surfaced_once() {
        let (done, mut pending) = pending_pair::<u32>(Request(0), "car.glb");
        done.complete(Err(LoadError::Empty {
            url: "car.glb".into(),
        }));
        assert!(matches!(pending.try_take(), Some(Err(LoadError::Empty { .. }))));
        assert_eq!(pending.state(), LoadState::Failed);
        assert!(pending.try_take().is_none());
    }

    #[test]
    fn dropped_loader_is_reported_as_abandoned() {
        let (done, mut pending) = pending_pair::<u32>(Request(1), "car.glb");
        drop(done);
        assert!(matches!(
            pending.try_take(),
            Some(Err(LoadError::Abandoned { .. }))
        ));
    }

    #[test]
    fn cancel_releases_the_loader() {
        let (done, mut pending) = pending_pair::<u32>(Request(2), "car.glb");
        assert!(pending.cancel());
        assert!(!pending.cancel());
        assert_eq!(pending.state(), LoadState::Cancelled);

        assert!(done.is_cancelled());
        assert!(!done.complete(Ok(1)));
        assert!(pending.try_take().is_none());
    }
}

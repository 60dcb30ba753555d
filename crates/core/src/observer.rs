/// Watches the candidates an exposure scan evaluates.
///
/// A scan reports each candidate exposure time it tries as an event `E`.
/// Returning `Some(action)` asks the scan to act on it (stop early, say);
/// returning `None` lets it continue to the next candidate.
///
/// Any `FnMut(&E) -> Option<A>` closure is an observer, and `()` is the
/// observer that never acts.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Exposure time tried and value found.
    struct Candidate {
        exptime: f64,
        snr: f64,
    }

    #[derive(Debug, PartialEq)]
    enum Halt {
        Budget,
    }

    #[test]
    fn unit_observer_lets_scan_run() {
        let candidate = Candidate {
            exptime: 12.0,
            snr: 30.0,
        };

        assert_eq!(Observer::<_, Halt>::observe(&mut (), &candidate), None);
    }

    #[test]
    fn closure_can_enforce_exposure_budget() {
        let mut log = Vec::new();
        let mut budget = |candidate: &Candidate| {
            log.push((candidate.exptime, candidate.snr));
            (candidate.exptime > 60.0).then_some(Halt::Budget)
        };

        let scan = [(12.0, 30.0), (48.0, 60.0), (120.0, 95.0)];
        let halted_at = scan.iter().position(|&(exptime, snr)| {
            budget.observe(&Candidate { exptime, snr }).is_some()
        });

        assert_eq!(halted_at, Some(2));
        assert_eq!(log, vec![(12.0, 30.0), (48.0, 60.0), (120.0, 95.0)]);
    }
}

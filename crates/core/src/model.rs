/// A performance curve evaluated by the exposure-time solvers.
///
/// The calculator implements this for a stellar target held fixed on a
/// performance grid: the input is an exposure time in seconds and the output
/// is the interpolated RV precision or SNR at that exposure. Solvers only see
/// this trait, so they can be tested against analytic curves.
pub trait Model {
    type Input;
    type Output;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Evaluates the curve at `input`.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve cannot be evaluated there, for example
    /// when the underlying grid lookup fails.
    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error>;
}

/// One evaluated point of a curve.
///
/// The max-exposure advisor keeps the point at its reference exposure time
/// for the order that binds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<I, O> {
    pub input: I,
    pub output: O,
}

impl<I, O> Snapshot<I, O> {
    pub fn new(input: I, output: O) -> Self {
        Self { input, output }
    }
}

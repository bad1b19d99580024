// Environments are synchronous, so tasks are plain blocking closures of work.
pub trait Task: Send + 'static {
    type Output: Send + 'static;
    fn run(self) -> Self::Output;
}

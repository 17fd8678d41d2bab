use std::future::Future;
use std::pin::Pin;

/// Side effects returned from `App::update`, carried out by the runtime
pub enum Command<Msg> {
    None,

    /// Run each command in order, stopping early on `Quit`
    Batch(Vec<Command<Msg>>),

    /// Spawned on tokio; the output comes back through `update`
    Perform(Pin<Box<dyn Future<Output = Msg> + Send>>),

    Quit,
}

impl<Msg> Command<Msg> {
    /// Run `future` in the background and turn its output into a message
    pub fn perform<F, T>(future: F, to_msg: impl FnOnce(T) -> Msg + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        Msg: Send + 'static,
    {
        Command::Perform(Box::pin(async move { to_msg(future.await) }))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Command::None)
    }
}

impl<Msg> Default for Command<Msg> {
    fn default() -> Self {
        Command::None
    }
}

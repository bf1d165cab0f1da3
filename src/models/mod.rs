mod session;
mod subscription;

pub use session::Session;
pub use subscription::Subscription;

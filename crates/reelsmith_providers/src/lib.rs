//! Provider adapters for avatar rendering and social video upload.
//!
//! Each capability is polymorphic over a **simulated** variant (offline,
//! deterministic, placeholder artifacts) and a **live** variant (real
//! network calls with bounded retry, rate limiting, and polling). The
//! variant is selected by explicit configuration threaded into the
//! factories, never by ambient process state, and the two are never
//! mixed within one run.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod avatar;
mod clock;
mod credentials;
mod factory;
mod http;
mod poll;
mod retry;
mod settings;
mod throttle;
mod toggles;
mod upload;

pub use avatar::{AvatarRenderer, LiveAvatarRenderer, SimulatedAvatarRenderer};
pub use clock::{Clock, ManualClock, TokioClock};
pub use credentials::{AvatarCredentials, UploadCredentials};
pub use factory::{build_avatar_renderer, build_uploader};
pub use poll::{PollPolicy, await_completion};
pub use retry::{RetryPolicy, retry_with_policy};
pub use settings::{ProviderEndpoint, ProviderSettings};
pub use throttle::{CallThrottle, ThrottleGuard};
pub use toggles::{ProviderMode, ProviderToggles};
pub use upload::{LiveUploader, SimulatedUploader, VideoUploader};

//! AgentDesk core
//!
//! Shared domain types for the support-agent admin surface: the agent
//! read model, the creation-form validation pipeline, the client-side
//! session gate, and the seam to the external agent directory service.

pub mod agent;
pub mod directory;
pub mod form;
pub mod session;

pub use agent::{AgentCreate, AgentUpdate, ProvisionedAgent, SupportAgent};
pub use directory::{AgentDirectory, DirectoryError};
pub use form::{AgentForm, FormError};
pub use session::{AdminSession, SessionError};

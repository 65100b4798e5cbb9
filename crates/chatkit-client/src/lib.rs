//! `ck-chatkit`: client for the upstream ChatKit session API.
//!
//! Provides the [`SessionApi`] trait the broker depends on, a production
//! REST implementation ([`RestSessionClient`]) and the request/reply DTOs.
//!
//! The client reports *what upstream said*; deciding which HTTP response
//! the browser gets is left to the broker.
//!
//! ```rust,no_run
//! use ck_chatkit::{CreateSessionRequest, RestSessionClient, SessionApi};
//!
//! # async fn example() -> ck_domain::error::Result<()> {
//! let client = RestSessionClient::new("https://api.openai.com", None)?;
//! let reply = client
//!     .create_session("sk-...", &CreateSessionRequest::new("wf_123", "visitor-1"))
//!     .await?;
//! println!("upstream answered {}", reply.status);
//! # Ok(())
//! # }
//! ```

pub mod provider;
pub mod rest;
pub mod types;

pub use provider::SessionApi;
pub use rest::{RestSessionClient, BETA_HEADER, BETA_HEADER_VALUE, SESSIONS_PATH};
pub use types::{CreateSessionRequest, SessionReply, WorkflowParam};

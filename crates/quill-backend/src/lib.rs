//! # quill-backend
//!
//! Client for the backend trust authority: `POST /auth/google` issues a
//! bearer credential for a provider identity, `GET /auth/me` resolves one.

pub mod client;

pub use client::BackendClient;

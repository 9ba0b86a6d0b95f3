//! # Diffusion
//!
//! $$
//! dX_t=a(t,X_t)\,dt+b(t,X_t)\,dW_t
//! $$
//!
pub mod gbm;

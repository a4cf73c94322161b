//! Real-time scheduling for the match engine.
//!
//! `MatchEngine` never sleeps; it hands out resolution tickets and expects
//! `tick` to be called once a second. `SessionDriver` does both on a tokio
//! runtime and makes sure scheduled work from an abandoned session can never
//! touch its successor.
//!
//! ```no_run
//! use memory_match::clock::SessionDriver;
//! use memory_match::core::{Difficulty, EngineConfig};
//! use memory_match::engine::MatchEngine;
//!
//! # async fn run() -> memory_match::core::Result<()> {
//! let engine = MatchEngine::new(EngineConfig::default(), Difficulty::Medium)?;
//! let driver = SessionDriver::start(engine);
//!
//! let card = driver.snapshot().await.cards()[0].id;
//! driver.flip(card).await?;
//! driver.shutdown().await;
//! # Ok(())
//! # }
//! ```

mod driver;

pub use driver::SessionDriver;

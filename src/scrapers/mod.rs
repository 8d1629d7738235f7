//! Article-URL scraping from news listing pages.
//!
//! The scraper is deliberately not a crawler: it fetches one listing page at
//! a time and a human drives pagination from the keyboard. Two pieces work
//! together:
//!
//! - [`session`]: the per-run context holding the HTTP client with a
//!   configured user agent, the process-lifetime seen-URL set, and the
//!   fixed pre-parse delay
//! - [`peoples_daily`]: link extraction for the People's Daily English
//!   listing markup (anchor selector plus keyword filter over anchor text
//!   and adjacent snippets)
//!
//! Failed fetches are not retried; the append-mode CSV output makes an
//! interrupted run resumable.

pub mod peoples_daily;
pub mod session;

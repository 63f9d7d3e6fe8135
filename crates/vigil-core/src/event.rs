//! Inbound event models
//!
//! Typed models for the six event streams. Only the behavioral kinds
//! (order, login, buy, scroll) feed the fraud window; user and article
//! records are reference data that is archived but never scored.

use crate::error::{CoreError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event stream kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    User,
    Article,
    Order,
    Login,
    Buy,
    Scroll,
}

impl EventKind {
    /// Short name used for route segments and archive files
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::User => "user",
            EventKind::Article => "article",
            EventKind::Order => "order",
            EventKind::Login => "login",
            EventKind::Buy => "buy",
            EventKind::Scroll => "scroll",
        }
    }

    /// Stream topic name for this kind
    pub fn topic(&self) -> &'static str {
        match self {
            EventKind::User => "user-events",
            EventKind::Article => "article-events",
            EventKind::Order => "order-events",
            EventKind::Login => "login-events",
            EventKind::Buy => "buy-events",
            EventKind::Scroll => "scroll-events",
        }
    }

    /// Parse a kind from its short name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "user" => Ok(EventKind::User),
            "article" => Ok(EventKind::Article),
            "order" => Ok(EventKind::Order),
            "login" => Ok(EventKind::Login),
            "buy" => Ok(EventKind::Buy),
            "scroll" => Ok(EventKind::Scroll),
            other => Err(CoreError::UnknownEventKind(other.to_string())),
        }
    }

    /// Whether events of this kind count toward the fraud window
    pub fn is_behavioral(&self) -> bool {
        matches!(
            self,
            EventKind::Order | EventKind::Login | EventKind::Buy | EventKind::Scroll
        )
    }
}

/// User record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub registration_date: DateTime<Utc>,
}

/// Article record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub article_id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub currency: String,
}

/// Order event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub user_id: String,
    pub article_id: String,
    pub quantity: u32,
    pub total_price: f64,
    pub currency: String,
    pub timestamp: DateTime<Utc>,
}

/// Login event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Login {
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub ip_address: String,
    pub device_id: String,
    pub success: bool,
}

/// Buy event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Buy {
    pub user_id: String,
    pub order_id: String,
    pub timestamp: DateTime<Utc>,
    pub payment_method: String,
}

/// Scroll event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    pub user_id: String,
    pub article_id: String,
    pub timestamp: DateTime<Utc>,
    pub percentage: f64,
    pub duration_seconds: f64,
}

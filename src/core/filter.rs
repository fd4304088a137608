//! Decide which records make it into the CSV.
//!
//! A record goes through three stages, in order:
//!
//! | Stage | Rejects when | Reason |
//! |-------|--------------|--------|
//! | Inclusion | some kind is whitelisted and this one is not | [`RejectReason::NotIncluded`] |
//! | Exclusion | this kind is excluded | [`RejectReason::Excluded`] |
//! | Target | targets are configured and none matches | [`RejectReason::NonTarget`] |
//!
//! # Example
//!
//! ```
//! use attachlog::core::filter::{Decision, FilterConfig, RejectReason};
//! use attachlog::record::{LogRecord, MessageKind, Origin};
//!
//! let config = FilterConfig::new()
//!     .exclude(MessageKind::DirectMessage)
//!     .with_user("alice");
//!
//! let record = LogRecord {
//!     msgid: "1",
//!     origin: Origin::Group { name: "", user: "alice" },
//!     attachment_json: "{}",
//!     span: 0..0,
//! };
//! assert_eq!(config.evaluate(&record), Decision::Accept);
//!
//! let dm = LogRecord {
//!     origin: Origin::Direct { from: "alice", to: "bob" },
//!     ..record
//! };
//! assert_eq!(config.evaluate(&dm), Decision::Reject(RejectReason::Excluded));
//! ```
//!
//! # Behavior Notes
//!
//! - Target names match exactly (case-sensitive)
//! - Target categories are combined with OR logic
//! - An empty group target matches unnamed groups

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::record::{LogRecord, MessageKind, Origin};

/// How a message kind is treated.
///
/// Include and exclude are variants of one enum, so a kind can never be
/// both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeRule {
    /// No rule for this kind.
    #[default]
    Any,
    /// Whitelist this kind. Once any kind is whitelisted, kinds that are not
    /// are rejected.
    Include,
    /// Always reject this kind.
    Exclude,
}

/// Per-kind rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRules {
    pub guild: TypeRule,
    pub dm: TypeRule,
    pub group: TypeRule,
}

impl TypeRules {
    /// Returns the rule for `kind`.
    pub fn rule(&self, kind: MessageKind) -> TypeRule {
        match kind {
            MessageKind::Guild => self.guild,
            MessageKind::DirectMessage => self.dm,
            MessageKind::Group => self.group,
        }
    }

    /// Sets the rule for `kind`.
    #[must_use]
    pub fn with(mut self, kind: MessageKind, rule: TypeRule) -> Self {
        match kind {
            MessageKind::Guild => self.guild = rule,
            MessageKind::DirectMessage => self.dm = rule,
            MessageKind::Group => self.group = rule,
        }
        self
    }

    /// Returns `true` if at least one kind is whitelisted.
    pub fn whitelist_active(&self) -> bool {
        MessageKind::all()
            .iter()
            .any(|&k| self.rule(k) == TypeRule::Include)
    }

    /// Returns `true` if every kind is excluded, so no record can pass.
    pub fn excludes_everything(&self) -> bool {
        MessageKind::all()
            .iter()
            .all(|&k| self.rule(k) == TypeRule::Exclude)
    }

    /// Runs the inclusion and exclusion stages for `kind`.
    pub fn admit(&self, kind: MessageKind) -> Result<(), RejectReason> {
        match (self.rule(kind), self.whitelist_active()) {
            (TypeRule::Include, _) | (TypeRule::Any, false) => Ok(()),
            (TypeRule::Any | TypeRule::Exclude, true) => Err(RejectReason::NotIncluded),
            (TypeRule::Exclude, false) => Err(RejectReason::Excluded),
        }
    }
}

/// Names to look for in record origins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targets {
    /// Group names. The empty string targets unnamed groups.
    pub groups: BTreeSet<String>,
    pub guilds: BTreeSet<String>,
    pub channels: BTreeSet<String>,
    /// User names, matched against guild and group authors and both DM
    /// participants.
    pub users: BTreeSet<String>,
}

impl Targets {
    /// Returns `true` if no target is configured.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
            && self.guilds.is_empty()
            && self.channels.is_empty()
            && self.users.is_empty()
    }

    /// Returns `true` if no targets are configured or `origin` matches any.
    pub fn matches(&self, origin: &Origin<'_>) -> bool {
        if self.is_empty() {
            return true;
        }

        let place = match *origin {
            Origin::Guild { guild, channel, .. } => {
                self.guilds.contains(guild) || self.channels.contains(channel)
            }
            Origin::Group { name, .. } => self.groups.contains(name),
            Origin::Direct { .. } => false,
        };

        place || origin.users().any(|u| self.users.contains(u))
    }
}

/// Why a record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Another kind is whitelisted.
    NotIncluded,
    /// The record's kind is excluded.
    Excluded,
    /// Targets are configured and none matched.
    NonTarget,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::NotIncluded => write!(f, "not included"),
            RejectReason::Excluded => write!(f, "excluded"),
            RejectReason::NonTarget => write!(f, "non-target"),
        }
    }
}

/// Outcome of [`FilterConfig::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject(RejectReason),
}

/// Filter configuration: per-kind rules plus target names.
///
/// # Examples
///
/// ```
/// use attachlog::core::filter::FilterConfig;
/// use attachlog::record::MessageKind;
///
/// // Only DMs and groups, from one user
/// let config = FilterConfig::new()
///     .include(MessageKind::DirectMessage)
///     .include(MessageKind::Group)
///     .with_user("alice");
///
/// assert!(!config.excludes_everything());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub types: TypeRules,
    pub targets: Targets,
}

impl FilterConfig {
    /// Creates a configuration that accepts every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the rule for one kind.
    #[must_use]
    pub fn with_rule(mut self, kind: MessageKind, rule: TypeRule) -> Self {
        self.types = self.types.with(kind, rule);
        self
    }

    /// Whitelists `kind`.
    #[must_use]
    pub fn include(self, kind: MessageKind) -> Self {
        self.with_rule(kind, TypeRule::Include)
    }

    /// Excludes `kind`.
    #[must_use]
    pub fn exclude(self, kind: MessageKind) -> Self {
        self.with_rule(kind, TypeRule::Exclude)
    }

    /// Adds a group name target.
    #[must_use]
    pub fn with_group(mut self, name: impl Into<String>) -> Self {
        self.targets.groups.insert(name.into());
        self
    }

    /// Adds a guild name target.
    #[must_use]
    pub fn with_guild(mut self, name: impl Into<String>) -> Self {
        self.targets.guilds.insert(name.into());
        self
    }

    /// Adds a channel name target.
    #[must_use]
    pub fn with_channel(mut self, name: impl Into<String>) -> Self {
        self.targets.channels.insert(name.into());
        self
    }

    /// Adds a user name target.
    #[must_use]
    pub fn with_user(mut self, name: impl Into<String>) -> Self {
        self.targets.users.insert(name.into());
        self
    }

    /// Returns `true` if no record can ever pass.
    pub fn excludes_everything(&self) -> bool {
        self.types.excludes_everything()
    }

    /// Runs all three stages against `record`.
    pub fn evaluate(&self, record: &LogRecord<'_>) -> Decision {
        if let Err(reason) = self.types.admit(record.kind()) {
            return Decision::Reject(reason);
        }
        if !self.targets.matches(&record.origin) {
            return Decision::Reject(RejectReason::NonTarget);
        }
        Decision::Accept
    }
}

//! Author matching: login regexes and team membership.
//!
//! Pattern grammar, one entry at a time:
//!
//! - `@org/team` matches when the author is a member of the team
//! - `!@org/team` matches when the author is known not to be a member
//! - anything else is a regex searched in the author login
//!
//! Team lookups go through a [`TeamMembershipLookup`] collaborator and are
//! memoized per `(org/team, username)` for the lifetime of the matcher. A
//! failed lookup, or no collaborator at all, makes both team forms fail.

use crate::regex_cache::RegexCache;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// External source of team membership.
#[async_trait]
pub trait TeamMembershipLookup: Send + Sync {
    /// Whether `username` belongs to `org/team`.
    async fn lookup_team_membership(
        &self,
        org: &str,
        team: &str,
        username: &str,
    ) -> anyhow::Result<bool>;
}

/// Cached outcome of one membership lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Member,
    NotMember,
    /// The lookup failed.
    Unknown,
}

/// Memoized lookups keyed by `(org/team, username)`.
#[derive(Debug, Default)]
pub struct TeamMembershipCache {
    entries: HashMap<(String, String), Membership>,
}

impl TeamMembershipCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, team_ref: &str, username: &str) -> Option<Membership> {
        self.entries
            .get(&(team_ref.to_string(), username.to_string()))
            .copied()
    }

    pub fn insert(&mut self, team_ref: &str, username: &str, membership: Membership) {
        self.entries
            .insert((team_ref.to_string(), username.to_string()), membership);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One parsed author pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorPattern<'a> {
    Team { org: &'a str, team: &'a str },
    NotTeam { org: &'a str, team: &'a str },
    Regex(&'a str),
}

impl<'a> AuthorPattern<'a> {
    pub fn parse(pattern: &'a str) -> Self {
        if let Some(team_ref) = pattern.strip_prefix("!@").filter(|r| r.contains('/')) {
            let (org, team) = split_team_ref(team_ref);
            return AuthorPattern::NotTeam { org, team };
        }
        if let Some(team_ref) = pattern.strip_prefix('@').filter(|r| r.contains('/')) {
            let (org, team) = split_team_ref(team_ref);
            return AuthorPattern::Team { org, team };
        }
        AuthorPattern::Regex(pattern)
    }
}

fn split_team_ref(team_ref: &str) -> (&str, &str) {
    team_ref.split_once('/').unwrap_or((team_ref, ""))
}

/// Evaluates author pattern lists against a PR author.
pub struct AuthorMatcher {
    client: Option<Arc<dyn TeamMembershipLookup>>,
    cache: TeamMembershipCache,
    regexes: RegexCache,
}

impl fmt::Debug for AuthorMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorMatcher")
            .field("has_client", &self.client.is_some())
            .field("cache", &self.cache)
            .field("regexes", &self.regexes)
            .finish()
    }
}

impl Default for AuthorMatcher {
    fn default() -> Self {
        Self::new(None)
    }
}

impl AuthorMatcher {
    pub fn new(client: Option<Arc<dyn TeamMembershipLookup>>) -> Self {
        Self {
            client,
            cache: TeamMembershipCache::new(),
            regexes: RegexCache::new(),
        }
    }

    pub fn with_client(client: Arc<dyn TeamMembershipLookup>) -> Self {
        Self::new(Some(client))
    }

    pub fn cache(&self) -> &TeamMembershipCache {
        &self.cache
    }

    /// True if any pattern matches `author`. Empty lists and empty logins
    /// never match.
    pub async fn match_any(&mut self, patterns: &[String], author: &str) -> bool {
        if author.is_empty() {
            return false;
        }
        for pattern in patterns {
            if self.match_one(pattern, author).await {
                return true;
            }
        }
        false
    }

    async fn match_one(&mut self, pattern: &str, author: &str) -> bool {
        match AuthorPattern::parse(pattern) {
            AuthorPattern::Regex(re) => self.regexes.is_match(re, author),
            AuthorPattern::Team { org, team } => {
                self.membership(org, team, author).await == Membership::Member
            }
            AuthorPattern::NotTeam { org, team } => {
                self.membership(org, team, author).await == Membership::NotMember
            }
        }
    }

    async fn membership(&mut self, org: &str, team: &str, author: &str) -> Membership {
        let Some(client) = self.client.clone() else {
            return Membership::Unknown;
        };
        if org.is_empty() || team.is_empty() {
            return Membership::Unknown;
        }

        let team_ref = format!("{org}/{team}");
        if let Some(cached) = self.cache.get(&team_ref, author) {
            trace!(team = %team_ref, author, ?cached, "team membership cache hit");
            return cached;
        }

        let membership = match client.lookup_team_membership(org, team, author).await {
            Ok(true) => Membership::Member,
            Ok(false) => Membership::NotMember,
            Err(e) => {
                debug!(team = %team_ref, author, error = %e, "team membership lookup failed");
                Membership::Unknown
            }
        };
        self.cache.insert(&team_ref, author, membership);
        membership
    }
}

/// In-memory [`TeamMembershipLookup`] backed by a fixed team roster.
///
/// Logins are compared case-insensitively. Unknown teams have no members.
#[derive(Debug, Clone, Default)]
pub struct StaticTeamDirectory {
    teams: HashMap<String, HashSet<String>>,
}

impl StaticTeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add members to `org/team`.
    pub fn with_team<I, S>(mut self, team_ref: &str, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.teams.entry(team_ref.to_string()).or_default();
        entry.extend(members.into_iter().map(|m| m.as_ref().to_ascii_lowercase()));
        self
    }

    pub fn add_member(&mut self, team_ref: &str, username: &str) {
        self.teams
            .entry(team_ref.to_string())
            .or_default()
            .insert(username.to_ascii_lowercase());
    }

    pub fn is_member(&self, org: &str, team: &str, username: &str) -> bool {
        self.teams
            .get(&format!("{org}/{team}"))
            .is_some_and(|members| members.contains(&username.to_ascii_lowercase()))
    }
}

#[async_trait]
impl TeamMembershipLookup for StaticTeamDirectory {
    async fn lookup_team_membership(
        &self,
        org: &str,
        team: &str,
        username: &str,
    ) -> anyhow::Result<bool> {
        Ok(self.is_member(org, team, username))
    }
}

//! Picks one capability out of a service-provider description.
//!
//! Priority, over every capability of the requested kind in services of the
//! requested domain (document order, later matches overriding earlier ones):
//!
//! 1. last candidate typed for the requested resource type (and, when a
//!    usage is requested, also carrying that usage);
//! 2. last candidate tagged with the `oslc:default` usage;
//! 3. the first candidate of the last matching service that has any, only
//!    when it declares no resource type.

use crate::domain::model::{Capability, CapabilityKind, ServiceProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityRequest<'a> {
    pub kind: CapabilityKind,
    pub domain: &'a str,
    pub resource_type: Option<&'a str>,
    pub usage: Option<&'a str>,
}

impl<'a> CapabilityRequest<'a> {
    pub fn new(kind: CapabilityKind, domain: &'a str) -> Self {
        Self {
            kind,
            domain,
            resource_type: None,
            usage: None,
        }
    }

    /// Empty strings count as "not requested".
    pub fn resource_type(mut self, resource_type: Option<&'a str>) -> Self {
        self.resource_type = resource_type.filter(|t| !t.is_empty());
        self
    }

    pub fn usage(mut self, usage: Option<&'a str>) -> Self {
        self.usage = usage.filter(|u| !u.is_empty());
        self
    }
}

#[derive(Default)]
struct Tiers<'c> {
    first: Option<&'c Capability>,
    exact: Option<&'c Capability>,
    default: Option<&'c Capability>,
}

impl<'c> Tiers<'c> {
    /// Each service restarts the untyped-first tier.
    fn observe_service(self, group: &[&'c Capability], request: &CapabilityRequest<'_>) -> Self {
        let mut tiers = self;
        if let Some(&first) = group.first() {
            tiers.first = Some(first);
        }
        group
            .iter()
            .fold(tiers, |tiers, &c| tiers.observe(c, request))
    }

    fn observe(mut self, candidate: &'c Capability, request: &CapabilityRequest<'_>) -> Self {
        let typed = request
            .resource_type
            .is_some_and(|t| candidate.applies_to(t));
        let usage_ok = request.usage.map_or(true, |u| candidate.has_usage(u));
        if typed && usage_ok {
            self.exact = Some(candidate);
        }

        if candidate.is_default() {
            self.default = Some(candidate);
        }
        self
    }

    fn settle(self) -> Option<&'c Capability> {
        self.exact
            .or(self.default)
            .or(self.first.filter(|c| c.is_untyped()))
    }
}

/// Candidates of `request.kind`, grouped per service of `request.domain`,
/// in document order.
pub fn candidates<'p>(
    provider: &'p ServiceProvider,
    request: &CapabilityRequest<'_>,
) -> Vec<Vec<&'p Capability>> {
    provider
        .services
        .iter()
        .filter(|s| s.domain == request.domain)
        .map(|s| s.capabilities_of(request.kind).collect())
        .collect()
}

pub fn select<'c>(
    groups: &[Vec<&'c Capability>],
    request: &CapabilityRequest<'_>,
) -> Option<&'c Capability> {
    groups
        .iter()
        .fold(Tiers::default(), |tiers, group| tiers.observe_service(group, request))
        .settle()
}

pub fn resolve<'p>(
    provider: &'p ServiceProvider,
    request: &CapabilityRequest<'_>,
) -> Option<&'p Capability> {
    let groups = candidates(provider, request);
    let resolved = select(&groups, request);

    match resolved {
        Some(c) => tracing::debug!(
            "🎯 Resolved {} for domain {} -> {}",
            request.kind,
            request.domain,
            c.action
        ),
        None => tracing::debug!(
            "🎯 No {} for domain {} (type {:?}, {} candidates)",
            request.kind,
            request.domain,
            request.resource_type,
            groups.iter().map(Vec::len).sum::<usize>()
        ),
    }
    resolved
}

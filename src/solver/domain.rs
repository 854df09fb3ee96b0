//! Boolean domains and the persistent store the search runs over.
//!
//! Every decision variable in this crate is boolean, so a domain is one of
//! four sets: `{}`, `{false}`, `{true}`, `{false, true}`. [`BoolDomain`]
//! packs that into two bits; [`DomainStore`] maps variables to domains using
//! a persistent `im` map so that each search node can be cloned cheaply and
//! discarded on backtrack.

use crate::solver::engine::VariableId;

/// The set of values a boolean variable may still take.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoolDomain(u8);

const FALSE_BIT: u8 = 0b01;
const TRUE_BIT: u8 = 0b10;

impl BoolDomain {
    pub const EMPTY: Self = Self(0);
    pub const BOTH: Self = Self(FALSE_BIT | TRUE_BIT);

    /// The singleton domain `{value}`.
    pub const fn fixed(value: bool) -> Self {
        if value {
            Self(TRUE_BIT)
        } else {
            Self(FALSE_BIT)
        }
    }

    pub const fn contains(self, value: bool) -> bool {
        let bit = if value { TRUE_BIT } else { FALSE_BIT };
        self.0 & bit != 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn is_singleton(self) -> bool {
        self.len() == 1
    }

    /// The single remaining value, if the domain is a singleton.
    pub const fn singleton_value(self) -> Option<bool> {
        match self.0 {
            FALSE_BIT => Some(false),
            TRUE_BIT => Some(true),
            _ => None,
        }
    }

    /// Removes `value`, returning the narrowed domain.
    pub const fn remove(self, value: bool) -> Self {
        let bit = if value { TRUE_BIT } else { FALSE_BIT };
        Self(self.0 & !bit)
    }

    pub const fn intersect(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Keeps only the values for which `keep` returns true.
    pub fn retain(self, keep: impl Fn(bool) -> bool) -> Self {
        let mut out = self;
        for value in [false, true] {
            if self.contains(value) && !keep(value) {
                out = out.remove(value);
            }
        }
        out
    }

    /// Values still in the domain, `false` before `true`.
    pub fn iter(self) -> impl Iterator<Item = bool> {
        [false, true].into_iter().filter(move |&v| self.contains(v))
    }
}

impl std::fmt::Debug for BoolDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            0 => write!(f, "{{}}"),
            FALSE_BIT => write!(f, "{{false}}"),
            TRUE_BIT => write!(f, "{{true}}"),
            _ => write!(f, "{{false, true}}"),
        }
    }
}

/// A single, immutable state in the solver's search space.
///
/// Because the underlying map is persistent, narrowing one domain produces a
/// new store sharing structure with the old one; the search keeps the parent
/// state alive across a branch for free.
#[derive(Clone, Debug, Default)]
pub struct DomainStore {
    domains: im::HashMap<VariableId, BoolDomain>,
}

impl DomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a variable. Used only while building the model.
    pub fn insert(&mut self, var: VariableId, domain: BoolDomain) {
        self.domains.insert(var, domain);
    }

    /// The current domain of `var`. Panics on an unregistered variable,
    /// which is a bug in the constraint builder.
    pub fn get(&self, var: VariableId) -> BoolDomain {
        *self
            .domains
            .get(&var)
            .expect("variable not registered in the domain store")
    }

    /// A new store with `var` narrowed to `domain`.
    pub fn with(&self, var: VariableId, domain: BoolDomain) -> Self {
        Self {
            domains: self.domains.update(var, domain),
        }
    }

    /// True when every variable's domain is a singleton.
    pub fn is_complete(&self) -> bool {
        self.domains.values().all(|d| d.is_singleton())
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, BoolDomain)> + '_ {
        self.domains.iter().map(|(&var, &dom)| (var, dom))
    }

    /// Variables whose domain still holds both values.
    pub fn unassigned(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.iter()
            .filter(|(_, dom)| !dom.is_singleton())
            .map(|(var, _)| var)
    }
}

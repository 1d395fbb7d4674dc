//! In-memory application directory
//!
//! Holds applications together with the org-unit tree, the reporting tree,
//! involvements and app groups, which is everything needed to resolve an
//! application selector.

use crate::api::{ApplicationStore, SelectorResolver};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use eam_model::{
    AppGroupEntry, Application, ApplicationId, EntityKind, EntityReference, HierarchyQueryScope,
    Involvement, OrgUnit, Person, SelectionOptions,
};
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Applications and the structures used to select them
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    applications: DashMap<ApplicationId, Application>,
    org_units: DashMap<i64, OrgUnit>,
    people: DashMap<i64, Person>,
    involvements: RwLock<Vec<Involvement>>,
    app_groups: DashMap<i64, BTreeSet<ApplicationId>>,
}

impl InMemoryDirectory {
    /// Create empty directory
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_application(&self, application: Application) {
        self.applications.insert(application.id, application);
    }

    pub fn insert_org_unit(&self, org_unit: OrgUnit) {
        self.org_units.insert(org_unit.id, org_unit);
    }

    pub fn insert_person(&self, person: Person) {
        self.people.insert(person.id, person);
    }

    pub fn insert_involvement(&self, involvement: Involvement) {
        self.involvements.write().push(involvement);
    }

    /// Register an app group, possibly with no members yet
    pub fn insert_app_group(&self, group_id: i64) {
        self.app_groups.entry(group_id).or_default();
    }

    /// Add an application to a group, registering the group if needed
    pub fn insert_app_group_entry(&self, entry: AppGroupEntry) {
        self.app_groups
            .entry(entry.group_id)
            .or_default()
            .insert(entry.application_id);
    }

    /// Number of applications held
    #[inline]
    #[must_use]
    pub fn application_count(&self) -> usize {
        self.applications.len()
    }

    fn select_application(&self, id: i64) -> StoreResult<BTreeSet<ApplicationId>> {
        let app_id = ApplicationId(id);
        if !self.applications.contains_key(&app_id) {
            return Err(StoreError::NotFound(EntityReference::new(
                EntityKind::Application,
                id,
            )));
        }
        Ok(BTreeSet::from([app_id]))
    }

    fn select_app_group(&self, group_id: i64) -> StoreResult<BTreeSet<ApplicationId>> {
        self.app_groups
            .get(&group_id)
            .map(|members| members.value().clone())
            .ok_or(StoreError::NotFound(EntityReference::new(
                EntityKind::AppGroup,
                group_id,
            )))
    }

    fn select_org_unit(
        &self,
        root: i64,
        scope: HierarchyQueryScope,
    ) -> StoreResult<BTreeSet<ApplicationId>> {
        if !self.org_units.contains_key(&root) {
            return Err(StoreError::NotFound(EntityReference::new(
                EntityKind::OrgUnit,
                root,
            )));
        }

        let parent_of: HashMap<i64, Option<i64>> = self
            .org_units
            .iter()
            .map(|e| (*e.key(), e.value().parent_id))
            .collect();

        let units = traverse(root, scope, |id| parent_of.get(&id).copied().flatten(), |id| {
            parent_of
                .iter()
                .filter(|(_, parent)| **parent == Some(id))
                .map(|(child, _)| *child)
                .collect()
        });

        Ok(self
            .applications
            .iter()
            .filter(|e| units.contains(&e.value().organisational_unit_id))
            .map(|e| *e.key())
            .collect())
    }

    fn select_person(
        &self,
        person_id: i64,
        scope: HierarchyQueryScope,
    ) -> StoreResult<BTreeSet<ApplicationId>> {
        let root_employee = self
            .people
            .get(&person_id)
            .map(|p| p.employee_id.clone())
            .ok_or(StoreError::NotFound(EntityReference::new(
                EntityKind::Person,
                person_id,
            )))?;

        let manager_of: HashMap<String, Option<String>> = self
            .people
            .iter()
            .map(|e| (e.value().employee_id.clone(), e.value().manager_employee_id.clone()))
            .collect();

        let employees = traverse(
            root_employee,
            scope,
            |emp| manager_of.get(&emp).cloned().flatten(),
            |emp| {
                manager_of
                    .iter()
                    .filter(|(_, manager)| manager.as_deref() == Some(emp.as_str()))
                    .map(|(reportee, _)| reportee.clone())
                    .collect()
            },
        );

        Ok(self
            .involvements
            .read()
            .iter()
            .filter(|inv| employees.contains(&inv.employee_id))
            .map(|inv| inv.application_id)
            .collect())
    }
}

/// Walk a hierarchy from `root` according to `scope`
///
/// Visited nodes are tracked so malformed data with cycles terminates.
fn traverse<K, P, C>(root: K, scope: HierarchyQueryScope, parent: P, children: C) -> BTreeSet<K>
where
    K: Ord + Clone,
    P: Fn(K) -> Option<K>,
    C: Fn(K) -> Vec<K>,
{
    let mut seen = BTreeSet::new();
    seen.insert(root.clone());

    match scope {
        HierarchyQueryScope::Exact => {}
        HierarchyQueryScope::Parents => {
            let mut current = parent(root);
            while let Some(node) = current {
                if !seen.insert(node.clone()) {
                    break;
                }
                current = parent(node);
            }
        }
        HierarchyQueryScope::Children => {
            let mut queue = VecDeque::from([root]);
            while let Some(node) = queue.pop_front() {
                for child in children(node) {
                    if seen.insert(child.clone()) {
                        queue.push_back(child);
                    }
                }
            }
        }
    }

    seen
}

#[async_trait]
impl SelectorResolver for InMemoryDirectory {
    async fn resolve(&self, options: &SelectionOptions) -> StoreResult<BTreeSet<ApplicationId>> {
        let EntityReference { kind, id } = options.entity_reference;
        let ids = match kind {
            EntityKind::Application => self.select_application(id),
            EntityKind::AppGroup => self.select_app_group(id),
            EntityKind::OrgUnit => self.select_org_unit(id, options.scope),
            EntityKind::Person => self.select_person(id, options.scope),
            other => Err(StoreError::UnsupportedSelector(other)),
        }?;

        tracing::trace!(selection = %options, resolved = ids.len(), "Resolved application selector");
        Ok(ids)
    }
}

#[async_trait]
impl ApplicationStore for InMemoryDirectory {
    async fn find_by_id_set(&self, ids: &BTreeSet<ApplicationId>) -> StoreResult<Vec<Application>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.applications.get(id).map(|e| e.value().clone()))
            .collect())
    }
}

//! # Project Catalog
//!
//! Ordered, read-only mapping from skill name to the practice project handed out for it.
//! Built once at startup and shared behind an `Arc`.

use crate::domain::config::ProjectEntry;
use anyhow::{Result, bail};

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub skill: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    pub fn new(entries: &[ProjectEntry]) -> Result<Self> {
        if entries.is_empty() {
            bail!("Project catalog is empty");
        }
        let mut projects: Vec<Project> = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.skill.is_empty() {
                bail!("Project catalog contains an empty skill name");
            }
            if projects.iter().any(|p| p.skill == entry.skill) {
                bail!("Duplicate skill in project catalog: {}", entry.skill);
            }
            projects.push(Project {
                skill: entry.skill.clone(),
                description: entry.description.clone(),
            });
        }
        Ok(Self { projects })
    }

    /// Exact, case-sensitive lookup.
    pub fn lookup(&self, skill: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.skill == skill)
    }

    /// Skill names in insertion order.
    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.projects.iter().map(|p| p.skill.as_str())
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Workload readiness evaluation from the cluster tool's status output.

use crate::constants::DEFAULT_NAMESPACE;
use crate::error::{KankubeError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Resource kinds the status evaluator understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Deployment,
    DaemonSet,
    Job,
    Pod,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Deployment => "Deployment",
            Kind::DaemonSet => "DaemonSet",
            Kind::Job => "Job",
            Kind::Pod => "Pod",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = KankubeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Deployment" => Ok(Kind::Deployment),
            "DaemonSet" => Ok(Kind::DaemonSet),
            "Job" => Ok(Kind::Job),
            "Pod" => Ok(Kind::Pod),
            other => Err(KankubeError::UnsupportedKind(other.to_string())),
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    pub message: Option<String>,
}

/// Raw `status` object as the cluster tool reports it, covering the field
/// spellings of all supported kinds
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawStatus {
    // Deployment and DaemonSet
    observed_generation: Option<i64>,
    // Deployment
    replicas: Option<u64>,
    available_replicas: Option<u64>,
    unavailable_replicas: Option<u64>,
    updated_replicas: Option<u64>,
    // DaemonSet
    desired_number_scheduled: Option<u64>,
    number_available: Option<u64>,
    number_unavailable: Option<u64>,
    updated_number_scheduled: Option<u64>,
    // Job
    succeeded: Option<u64>,
    // Pod
    phase: Option<String>,
    conditions: Option<Vec<Condition>>,
}

/// One workload's status snapshot, mapped from the cluster tool's output.
/// Count fields are per-kind: replicated kinds fill the counts and
/// generations, pods fill phase and conditions.
#[derive(Debug, Clone)]
pub struct WorkloadStatus {
    pub name: String,
    pub namespace: String,
    pub kind: Kind,
    pub total: Option<u64>,
    pub available: Option<u64>,
    pub unavailable: Option<u64>,
    pub updated: Option<u64>,
    pub observed_generation: Option<i64>,
    pub desired_generation: Option<i64>,
    pub phase: Option<String>,
    pub conditions: Vec<Condition>,
}

impl WorkloadStatus {
    /// Map an already-parsed object (the tool's JSON output for a single
    /// resource) into a status record. Expects `kind`, `metadata` and
    /// `status` at the top level; Jobs additionally read
    /// `spec.completions`.
    pub fn from_object(object: &Value) -> Result<Self> {
        let kind: Kind = object
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| KankubeError::MalformedStatus("kind".to_string()))?
            .parse()?;

        let metadata = object
            .get("metadata")
            .ok_or_else(|| KankubeError::MalformedStatus("metadata".to_string()))?;
        let name = metadata
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| KankubeError::MalformedStatus("metadata.name".to_string()))?
            .to_string();
        let namespace = metadata
            .get("namespace")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_NAMESPACE)
            .to_string();
        let desired_generation = metadata.get("generation").and_then(Value::as_i64);

        let status = object
            .get("status")
            .ok_or_else(|| KankubeError::MalformedStatus("status".to_string()))?;
        let raw: RawStatus = serde_json::from_value(status.clone())
            .map_err(|e| KankubeError::MalformedStatus(format!("status: {}", e)))?;

        let mut record = WorkloadStatus {
            name,
            namespace,
            kind,
            total: None,
            available: None,
            unavailable: None,
            updated: None,
            observed_generation: raw.observed_generation,
            desired_generation,
            phase: None,
            conditions: Vec::new(),
        };

        match kind {
            Kind::Deployment => {
                record.total = raw.replicas;
                record.available = raw.available_replicas;
                record.unavailable = raw.unavailable_replicas;
                record.updated = raw.updated_replicas;
            }
            Kind::DaemonSet => {
                record.total = raw.desired_number_scheduled;
                record.available = raw.number_available;
                record.unavailable = raw.number_unavailable;
                record.updated = raw.updated_number_scheduled;
            }
            Kind::Job => {
                record.total = object
                    .get("spec")
                    .and_then(|s| s.get("completions"))
                    .and_then(Value::as_u64);
                record.available = raw.succeeded;
            }
            Kind::Pod => {
                record.phase = raw.phase;
                record.conditions = raw.conditions.unwrap_or_default();
            }
        }

        Ok(record)
    }

    /// Compute the one-line summary and the ready verdict for this record.
    /// The verdict is what the surrounding tool turns into its exit code.
    pub fn evaluate(&self) -> Result<(String, bool)> {
        match self.kind {
            Kind::Deployment | Kind::DaemonSet => self.evaluate_replicated(),
            Kind::Job => self.evaluate_job(),
            Kind::Pod => self.evaluate_pod(),
        }
    }

    fn evaluate_replicated(&self) -> Result<(String, bool)> {
        let total = require(self.total, "total")?;
        let available = require(self.available, "available")?;
        // The tool omits the unavailable count once it reaches zero
        let unavailable = self.unavailable.unwrap_or(0);
        let updated = require(self.updated, "updated")?;
        let observed = require(self.observed_generation, "observedGeneration")?;
        let desired = require(self.desired_generation, "generation")?;

        let summary = format!(
            "{} ({}) in {}: {} total, {} available, {} unavailable, {} updated at generation {} ({})",
            self.name, self.kind, self.namespace, total, available, unavailable, updated, observed,
            desired
        );

        let ready =
            unavailable == 0 && available == total && updated == total && observed == desired;

        Ok((summary, ready))
    }

    fn evaluate_job(&self) -> Result<(String, bool)> {
        let total = require(self.total, "completions")?;
        let available = require(self.available, "succeeded")?;

        let summary = format!(
            "{} ({}) in {}: {} of {} completions",
            self.name, self.kind, self.namespace, available, total
        );

        Ok((summary, available == total))
    }

    fn evaluate_pod(&self) -> Result<(String, bool)> {
        let phase = self
            .phase
            .as_deref()
            .ok_or_else(|| KankubeError::MalformedStatus("phase".to_string()))?;

        let readiness: Vec<&Condition> = self
            .conditions
            .iter()
            .filter(|c| c.condition_type == "Ready" || c.condition_type == "ContainersReady")
            .collect();
        let satisfied = readiness.iter().filter(|c| c.status == "True").count();
        let has_ready = readiness.iter().any(|c| c.condition_type == "Ready");

        let summary = format!(
            "{} ({}) in {}: phase {}, {}/{} readiness conditions true",
            self.name,
            self.kind,
            self.namespace,
            phase,
            satisfied,
            readiness.len()
        );

        let ready = phase == "Running" && has_ready && satisfied == readiness.len();

        Ok((summary, ready))
    }
}

fn require<T: Copy>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| KankubeError::MalformedStatus(field.to_string()))
}

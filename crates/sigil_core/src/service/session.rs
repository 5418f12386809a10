//! Per-session sigil state container and recomputation driver.
//!
//! # Responsibility
//! - Own one user's Sigil Store, Alignment Map, ambient state and derived
//!   maps for the lifetime of a session.
//! - Orchestrate mutations (create, evolve, align) against the persistence
//!   service, then recompute derived state explicitly.
//!
//! # Invariants
//! - A mutation's remote write completes before any local state changes.
//! - Remote failures leave local state untouched and surface as
//!   `false`/`None` plus a logged diagnostic; nothing is retried.
//! - The Alignment Map holds at most one node per sigil and only references
//!   sigils in the store and nodes in the catalog.
//! - Derived maps never contain ids absent from the store.
//! - Stages are re-derived on every pass; a stage may regress when its score
//!   drops (for example after an ambient change).

use crate::model::chakra::ChakraType;
use crate::model::journal::{JournalEntry, JournalEvent};
use crate::model::law::UniversalLaw;
use crate::model::now_epoch_ms;
use crate::model::sigil::{EvolutionParent, NewSigil, OwnerId, Sigil, SigilId, SigilVisual};
use crate::model::stage::EvolutionStage;
use crate::model::timeline::{TimelineCatalog, TimelineNode, TimelineNodeId};
use crate::repo::SigilBackend;
use crate::resonance::compliance::{check_compliance, LawPadding};
use crate::resonance::evolution::{classify, progress};
use crate::resonance::field::aggregate;
use crate::resonance::pipeline::{recompute, DerivedState};
use crate::resonance::scorer::{score, AmbientState, ResonanceScore};
use crate::service::numerology::derive_numerology;
use log::{debug, error, info, warn};
use std::collections::BTreeMap;
use std::time::Instant;

/// Request for the generation action.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateSigilRequest {
    pub chakra: ChakraType,
    /// Defaults to the chakra's canonical tone when `None`.
    pub frequency_hz: Option<f64>,
    pub intention: String,
    pub visual: SigilVisual,
}

/// Request for the evolution action.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolveSigilRequest {
    pub parent_id: SigilId,
    /// Replacement intention; blank or `None` keeps the parent's.
    pub intention: Option<String>,
    /// Replacement visual; `None` keeps the parent's.
    pub visual: Option<SigilVisual>,
}

/// Owned, explicitly scoped state for one user session.
pub struct SigilSession<R: SigilBackend> {
    owner_id: OwnerId,
    repo: R,
    catalog: TimelineCatalog,
    ambient: AmbientState,
    sigils: Vec<Sigil>,
    alignments: BTreeMap<SigilId, TimelineNodeId>,
    derived: DerivedState,
}

impl<R: SigilBackend> SigilSession<R> {
    /// Creates an empty session using the default timeline catalog.
    pub fn new(owner_id: OwnerId, repo: R) -> Self {
        Self::with_catalog(owner_id, repo, TimelineCatalog::default())
    }

    /// Creates an empty session using a caller-supplied catalog.
    pub fn with_catalog(owner_id: OwnerId, repo: R, catalog: TimelineCatalog) -> Self {
        Self {
            owner_id,
            repo,
            catalog,
            ambient: AmbientState::default(),
            sigils: Vec::new(),
            alignments: BTreeMap::new(),
            derived: DerivedState::default(),
        }
    }

    pub fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn catalog(&self) -> &TimelineCatalog {
        &self.catalog
    }

    pub fn ambient(&self) -> AmbientState {
        self.ambient
    }

    /// Sigil Store contents, oldest first.
    pub fn sigils(&self) -> &[Sigil] {
        &self.sigils
    }

    pub fn sigil(&self, id: SigilId) -> Option<&Sigil> {
        self.sigils.iter().find(|sigil| sigil.id == id)
    }

    /// Alignment Map: sigil id -> timeline node id.
    pub fn alignments(&self) -> &BTreeMap<SigilId, TimelineNodeId> {
        &self.alignments
    }

    pub fn derived(&self) -> &DerivedState {
        &self.derived
    }

    /// Replaces local collections with the owner's persisted state.
    ///
    /// Alignments referencing unknown sigils or nodes are dropped. On remote
    /// failure the previous (possibly stale) state is kept and `false` is
    /// returned.
    pub fn load(&mut self) -> bool {
        let started_at = Instant::now();
        let sigils = match self.repo.list_sigils(self.owner_id) {
            Ok(sigils) => sigils,
            Err(err) => {
                error!(
                    "event=session_load module=session status=error stage=list_sigils error={}",
                    err
                );
                return false;
            }
        };
        let alignments = match self.repo.list_alignments(self.owner_id) {
            Ok(alignments) => alignments,
            Err(err) => {
                error!(
                    "event=session_load module=session status=error stage=list_alignments error={}",
                    err
                );
                return false;
            }
        };

        let owner_id = self.owner_id;
        self.sigils = sigils
            .into_iter()
            .filter(|sigil| sigil.owner_id == owner_id)
            .collect();
        self.alignments.clear();
        for alignment in alignments {
            if self.sigil(alignment.sigil_id).is_none()
                || !self.catalog.contains(&alignment.node_id)
            {
                warn!(
                    "event=session_load module=session status=skip error_code=dangling_alignment sigil_id={} node_id={}",
                    alignment.sigil_id, alignment.node_id
                );
                continue;
            }
            self.alignments.insert(alignment.sigil_id, alignment.node_id);
        }
        self.recompute();

        info!(
            "event=session_load module=session status=ok sigils={} alignments={} duration_ms={}",
            self.sigils.len(),
            self.alignments.len(),
            started_at.elapsed().as_millis()
        );
        true
    }

    /// Generates and persists a new sigil.
    ///
    /// Numerology is derived from the intention. Returns `None` on validation
    /// or remote failure.
    pub fn create_sigil(&mut self, request: CreateSigilRequest) -> Option<Sigil> {
        let frequency_hz = request
            .frequency_hz
            .unwrap_or_else(|| request.chakra.canonical_frequency());
        let new_sigil = NewSigil {
            owner_id: self.owner_id,
            chakra: request.chakra,
            frequency_hz,
            numerology: derive_numerology(&request.intention),
            intention: request.intention,
            visual: request.visual,
            evolved_from: None,
        };
        let detail = format!(
            "chakra={} frequency_hz={}",
            new_sigil.chakra.as_str(),
            new_sigil.frequency_hz
        );
        self.persist(new_sigil, JournalEvent::SigilCreated, detail)
    }

    /// Forks a new sigil from an existing one at the current wall clock.
    ///
    /// The child keeps the parent's chakra and frequency and records the
    /// parent's stage at fork time. Returns `None` when the parent is not in
    /// the store or the write fails.
    pub fn evolve_sigil(&mut self, request: EvolveSigilRequest) -> Option<Sigil> {
        self.evolve_sigil_at(request, now_epoch_ms())
    }

    /// Forks a new sigil, classifying the parent as observed at `now_ms`.
    ///
    /// The parent stage is classified fresh rather than read from derived
    /// state, which may be older than the fork.
    pub fn evolve_sigil_at(&mut self, request: EvolveSigilRequest, now_ms: i64) -> Option<Sigil> {
        let Some(parent) = self.sigil(request.parent_id).cloned() else {
            warn!(
                "event=sigil_evolve module=session status=error error_code=sigil_not_found sigil_id={}",
                request.parent_id
            );
            return None;
        };
        let parent_score = score(&parent, self.get_alignment(parent.id), &self.ambient);
        let parent_stage = classify(parent.created_at_ms, parent_score.overall, now_ms);

        let intention = request
            .intention
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| parent.intention.clone());
        let numerology = if intention == parent.intention {
            parent.numerology.clone()
        } else {
            derive_numerology(&intention)
        };

        let new_sigil = NewSigil {
            owner_id: self.owner_id,
            chakra: parent.chakra,
            frequency_hz: parent.frequency_hz,
            intention,
            numerology,
            visual: request.visual.unwrap_or_else(|| parent.visual.clone()),
            evolved_from: Some(EvolutionParent {
                parent_id: parent.id,
                parent_stage,
            }),
        };
        let detail = format!(
            "parent_id={} parent_stage={}",
            parent.id,
            parent_stage.as_str()
        );
        self.persist(new_sigil, JournalEvent::SigilEvolved, detail)
    }

    /// Aligns a sigil to a timeline node, replacing any prior alignment.
    ///
    /// Returns `false` when either id is unknown or the remote write fails;
    /// the Alignment Map is untouched in both cases.
    pub fn align(&mut self, sigil_id: SigilId, node_id: &str) -> bool {
        let node_id = node_id.trim();
        if self.sigil(sigil_id).is_none() {
            warn!(
                "event=sigil_align module=session status=error error_code=sigil_not_found sigil_id={}",
                sigil_id
            );
            return false;
        }
        if !self.catalog.contains(node_id) {
            warn!(
                "event=sigil_align module=session status=error error_code=node_not_found sigil_id={} node_id={}",
                sigil_id, node_id
            );
            return false;
        }

        if let Err(err) = self.repo.upsert_alignment(self.owner_id, sigil_id, node_id) {
            error!(
                "event=sigil_align module=session status=error error_code=remote_write_failed sigil_id={} error={}",
                sigil_id, err
            );
            return false;
        }

        self.alignments.insert(sigil_id, node_id.to_string());
        self.journal(JournalEntry::new(
            self.owner_id,
            JournalEvent::SigilAligned,
            Some(sigil_id),
            format!("node_id={node_id}"),
        ));
        self.recompute();
        info!(
            "event=sigil_align module=session status=ok sigil_id={} node_id={}",
            sigil_id, node_id
        );
        true
    }

    /// Returns the node a sigil is aligned to, if any.
    pub fn get_alignment(&self, sigil_id: SigilId) -> Option<&TimelineNode> {
        self.alignments
            .get(&sigil_id)
            .and_then(|node_id| self.catalog.get(node_id))
    }

    /// Switches the ambient state and recomputes.
    pub fn set_ambient(&mut self, ambient: AmbientState) {
        self.ambient = ambient;
        self.recompute();
    }

    /// Recomputes derived state at the current wall clock.
    pub fn recompute(&mut self) {
        self.recompute_at(now_epoch_ms());
    }

    /// Recomputes derived state as observed at `now_ms`.
    pub fn recompute_at(&mut self, now_ms: i64) {
        self.derived = recompute(
            &self.sigils,
            &self.alignments,
            &self.catalog,
            &self.ambient,
            now_ms,
        );
        debug!(
            "event=recompute module=session status=ok sigils={}",
            self.derived.scores.len()
        );
    }

    pub fn score(&self, sigil_id: SigilId) -> Option<&ResonanceScore> {
        self.derived.scores.get(&sigil_id)
    }

    pub fn stage(&self, sigil_id: SigilId) -> Option<EvolutionStage> {
        self.derived.stages.get(&sigil_id).copied()
    }

    /// Progress toward the next stage, in percent.
    pub fn stage_progress(&self, sigil_id: SigilId) -> Option<f64> {
        let stage = self.stage(sigil_id)?;
        let score = self.score(sigil_id)?;
        Some(progress(stage, score.overall))
    }

    /// Compliant laws for one sigil; empty when the sigil is unknown.
    pub fn check_compliance(
        &self,
        sigil_id: SigilId,
        padding: &mut dyn LawPadding,
    ) -> Vec<UniversalLaw> {
        match self.sigil(sigil_id) {
            Some(sigil) => {
                check_compliance(sigil, self.alignments.contains_key(&sigil_id), padding)
            }
            None => Vec::new(),
        }
    }

    /// Quantum field aggregate over the whole store.
    pub fn field_aggregate(&self) -> f64 {
        aggregate(&self.derived.scores, &self.alignments, &self.sigils)
    }

    fn persist(
        &mut self,
        new_sigil: NewSigil,
        event: JournalEvent,
        detail: String,
    ) -> Option<Sigil> {
        let started_at = Instant::now();
        let sigil = match self.repo.insert_sigil(&new_sigil) {
            Ok(sigil) => sigil,
            Err(err) => {
                error!(
                    "event={} module=session status=error error_code=remote_write_failed duration_ms={} error={}",
                    event.as_str(),
                    started_at.elapsed().as_millis(),
                    err
                );
                return None;
            }
        };

        self.sigils.push(sigil.clone());
        self.journal(JournalEntry::new(
            self.owner_id,
            event,
            Some(sigil.id),
            detail,
        ));
        self.recompute();
        info!(
            "event={} module=session status=ok sigil_id={} duration_ms={}",
            event.as_str(),
            sigil.id,
            started_at.elapsed().as_millis()
        );
        Some(sigil)
    }

    fn journal(&self, entry: JournalEntry) {
        if let Err(err) = self.repo.append_journal_entry(&entry) {
            warn!(
                "event=journal_append module=session status=error journal_event={} error={}",
                entry.event.as_str(),
                err
            );
        }
    }
}

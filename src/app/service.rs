//! Lock service — the facade over stores and actuation.
//!
//! [`LockService`] owns the user/credential/schedule stores and the
//! actuation state machine, and exposes the single coherent contract the
//! dispatch collaborator calls. Cross-store invariants (a credential's
//! owner must reference a present user) are applied here; everything below
//! validates only its own domain.
//!
//! ```text
//!  Dispatch ──▶ ┌──────────────────────────────┐ ──▶ ActuationTimer
//!               │          LockService          │
//!  AccessPolicy │  stores · actuation machine   │ ──▶ registered callbacks
//!               └──────────────────────────────┘
//! ```
//!
//! All operations run to completion on the caller's processing context; the
//! timer completion is delivered back on that same context via
//! [`handle_actuation_complete`](LockService::handle_actuation_complete).

use log::{info, warn};

use crate::actuation::{Action, ActuationStateMachine, Actor, LockState};
use crate::config::LockConfig;
use crate::error::{OperationError, Result, StoreError};
use crate::store::credential::{CredentialStatus, CredentialStore, CredentialType};
use crate::store::schedule::{
    HolidaySchedule, HolidayScheduleStore, OperatingMode, ScheduleStatus, WeekdaySchedule,
    WeekdayScheduleStore, YeardaySchedule, YeardayScheduleStore,
};
use crate::store::user::{CredentialRule, UserRecord, UserStatus, UserStore, UserType};
use crate::store::{CredentialRecord, CredentialRef};
use crate::validation;

use super::ports::{AccessPolicy, ActionObserver, ActuationTimer, SeedSource};

/// Listener for the initiated phase of an actuation.
pub type InitiatedCallback = fn(Action, Actor);
/// Listener for the completed phase of an actuation.
pub type CompletedCallback = fn(Action);

#[derive(Clone, Copy)]
struct CallbackPair {
    on_initiated: InitiatedCallback,
    on_completed: CompletedCallback,
}

/// Bridges the registered callback pair into the machine's observer seam.
struct CallbackObserver(Option<CallbackPair>);

impl ActionObserver for CallbackObserver {
    fn on_action_initiated(&mut self, action: Action, actor: Actor) {
        if let Some(pair) = self.0 {
            (pair.on_initiated)(action, actor);
        }
    }

    fn on_action_completed(&mut self, action: Action) {
        if let Some(pair) = self.0 {
            (pair.on_completed)(action);
        }
    }
}

// ───────────────────────────────────────────────────────────────
// LockService
// ───────────────────────────────────────────────────────────────

/// One instance per endpoint; the embedding passes it by reference to every
/// call site rather than holding it in global mutable state.
pub struct LockService {
    endpoint_id: u16,
    config: LockConfig,
    users: UserStore,
    credentials: CredentialStore,
    weekday: WeekdayScheduleStore,
    yearday: YeardayScheduleStore,
    holiday: HolidayScheduleStore,
    machine: ActuationStateMachine,
    callbacks: Option<CallbackPair>,
}

impl LockService {
    /// Construct the service for one endpoint.
    ///
    /// `initial_state` is the caller's last-known lock state (`None` falls
    /// back to the conservative locked assumption). Configured capacities
    /// above the compile-time maxima are the one fatal condition and refuse
    /// construction.
    pub fn new(
        endpoint_id: u16,
        initial_state: Option<LockState>,
        config: LockConfig,
    ) -> Result<Self> {
        config.validate()?;
        info!("lock service: endpoint {endpoint_id} configured with {config:?}");
        Ok(Self {
            endpoint_id,
            config,
            users: UserStore::new(config.credentials_per_user as usize),
            credentials: CredentialStore::new(),
            weekday: WeekdayScheduleStore::new(config.weekday_schedules_per_user as usize),
            yearday: YeardayScheduleStore::new(config.yearday_schedules_per_user as usize),
            holiday: HolidayScheduleStore::new(config.holiday_schedules as usize),
            machine: ActuationStateMachine::new(initial_state, config.actuator_movement_ms),
            callbacks: None,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// One-time seed from the persistence collaborator.
    ///
    /// Users land first so credential owner checks pass, then credentials,
    /// then schedules. A persisted lock state, when present, supersedes the
    /// state passed to [`new`](Self::new). Failures are returned to the
    /// caller; nothing is retried internally.
    pub fn init(&mut self, source: &impl SeedSource) -> Result<()> {
        let seed = source.read_seed()?;

        for entry in &seed.users {
            let r = &entry.record;
            self.set_user(
                entry.index,
                r.created_by,
                r.last_modified_by,
                &r.name,
                r.unique_id,
                r.status,
                r.user_type,
                r.credential_rule,
                &r.credentials,
            )?;
        }
        for entry in &seed.credentials {
            let r = &entry.record;
            self.set_credential(
                entry.index,
                r.created_by,
                r.last_modified_by,
                r.status,
                r.credential_type,
                &r.data,
                r.owner,
            )?;
        }
        for entry in &seed.weekday_schedules {
            let r = entry.record;
            self.set_weekday_schedule(
                entry.slot,
                entry.user_index,
                r.status,
                r.days_mask,
                r.start_hour,
                r.start_minute,
                r.end_hour,
                r.end_minute,
            )?;
        }
        for entry in &seed.yearday_schedules {
            let r = entry.record;
            self.set_yearday_schedule(
                entry.slot,
                entry.user_index,
                r.status,
                r.local_start,
                r.local_end,
            )?;
        }
        for entry in &seed.holiday_schedules {
            let r = entry.record;
            self.set_holiday_schedule(
                entry.slot,
                r.status,
                r.local_start,
                r.local_end,
                r.operating_mode,
            )?;
        }

        if let Some(state) = seed.lock_state {
            self.machine =
                ActuationStateMachine::new(Some(state), self.config.actuator_movement_ms);
        }
        info!(
            "lock service: endpoint {} seeded ({} users, {} credentials)",
            self.endpoint_id,
            seed.users.len(),
            seed.credentials.len()
        );
        Ok(())
    }

    /// Register the listener pair. Single-subscriber: re-registration
    /// replaces the previous pair.
    pub fn set_callbacks(&mut self, on_initiated: InitiatedCallback, on_completed: CompletedCallback) {
        self.callbacks = Some(CallbackPair {
            on_initiated,
            on_completed,
        });
    }

    // ── Actuation ─────────────────────────────────────────────

    /// Throw the bolt. The proof, if any, is judged by the access-policy
    /// collaborator; the core never inspects it.
    pub fn lock(
        &mut self,
        actor: Actor,
        proof: Option<&[u8]>,
        policy: &impl AccessPolicy,
        timer: &mut impl ActuationTimer,
    ) -> core::result::Result<(), OperationError> {
        self.set_lock_state(Action::Lock, actor, proof, policy, timer)
    }

    /// Withdraw the bolt.
    pub fn unlock(
        &mut self,
        actor: Actor,
        proof: Option<&[u8]>,
        policy: &impl AccessPolicy,
        timer: &mut impl ActuationTimer,
    ) -> core::result::Result<(), OperationError> {
        self.set_lock_state(Action::Unlock, actor, proof, policy, timer)
    }

    fn set_lock_state(
        &mut self,
        action: Action,
        actor: Actor,
        proof: Option<&[u8]>,
        policy: &impl AccessPolicy,
        timer: &mut impl ActuationTimer,
    ) -> core::result::Result<(), OperationError> {
        if let Err(e) = policy.authorize(action, proof) {
            warn!("lock service: {action} denied for {actor:?}: {e}");
            return Err(e);
        }
        let mut observer = CallbackObserver(self.callbacks);
        if !self
            .machine
            .initiate_action(actor, action, timer, &mut observer)
        {
            return Err(OperationError::ActionInProgress);
        }
        Ok(())
    }

    /// Actuation timer completion, delivered by the platform glue on the
    /// same processing context every other operation runs on.
    pub fn handle_actuation_complete(&mut self) {
        let mut observer = CallbackObserver(self.callbacks);
        self.machine.handle_timer_fired(&mut observer);
    }

    // ── Users ─────────────────────────────────────────────────

    pub fn get_user(&self, user_index: u16) -> Option<&UserRecord> {
        self.users.get(user_index)
    }

    pub fn set_user(
        &mut self,
        user_index: u16,
        created_by: u8,
        last_modified_by: u8,
        name: &str,
        unique_id: u32,
        status: UserStatus,
        user_type: UserType,
        credential_rule: CredentialRule,
        credentials: &[CredentialRef],
    ) -> core::result::Result<(), StoreError> {
        self.users.set(
            user_index,
            name,
            unique_id,
            status,
            user_type,
            credential_rule,
            credentials,
            created_by,
            last_modified_by,
        )
    }

    // ── Credentials ───────────────────────────────────────────

    pub fn get_credential(
        &self,
        credential_index: u16,
        credential_type: CredentialType,
    ) -> Option<&CredentialRecord> {
        self.credentials.get(credential_index, credential_type)
    }

    /// Write a credential slot. Cross-store invariant: an occupied
    /// credential naming an owner must reference a user slot that is not
    /// unset. Clearing skips the owner check.
    pub fn set_credential(
        &mut self,
        credential_index: u16,
        created_by: u8,
        last_modified_by: u8,
        status: CredentialStatus,
        credential_type: CredentialType,
        data: &[u8],
        owner: Option<u16>,
    ) -> core::result::Result<(), StoreError> {
        if !validation::is_valid_credential_index(credential_index, credential_type) {
            return Err(StoreError::IndexOutOfRange);
        }
        if status != CredentialStatus::Available {
            if let Some(owner_index) = owner {
                if !self.users.is_occupied(owner_index) {
                    warn!(
                        "lock service: credential {credential_index} names absent user {owner_index}"
                    );
                    return Err(StoreError::InvalidOwner);
                }
            }
        }
        self.credentials.set(
            credential_index,
            credential_type,
            status,
            data,
            owner,
            created_by,
            last_modified_by,
        )
    }

    // ── Schedules ─────────────────────────────────────────────

    pub fn get_weekday_schedule(
        &self,
        weekday_index: u8,
        user_index: u16,
    ) -> Option<&WeekdaySchedule> {
        self.weekday.get(user_index, weekday_index)
    }

    pub fn set_weekday_schedule(
        &mut self,
        weekday_index: u8,
        user_index: u16,
        status: ScheduleStatus,
        days_mask: u8,
        start_hour: u8,
        start_minute: u8,
        end_hour: u8,
        end_minute: u8,
    ) -> core::result::Result<(), StoreError> {
        self.weekday.set(
            user_index,
            weekday_index,
            status,
            days_mask,
            start_hour,
            start_minute,
            end_hour,
            end_minute,
        )
    }

    pub fn get_yearday_schedule(
        &self,
        yearday_index: u8,
        user_index: u16,
    ) -> Option<&YeardaySchedule> {
        self.yearday.get(user_index, yearday_index)
    }

    pub fn set_yearday_schedule(
        &mut self,
        yearday_index: u8,
        user_index: u16,
        status: ScheduleStatus,
        local_start: u32,
        local_end: u32,
    ) -> core::result::Result<(), StoreError> {
        self.yearday
            .set(user_index, yearday_index, status, local_start, local_end)
    }

    pub fn get_holiday_schedule(&self, holiday_index: u8) -> Option<&HolidaySchedule> {
        self.holiday.get(holiday_index)
    }

    pub fn set_holiday_schedule(
        &mut self,
        holiday_index: u8,
        status: ScheduleStatus,
        local_start: u32,
        local_end: u32,
        operating_mode: OperatingMode,
    ) -> core::result::Result<(), StoreError> {
        self.holiday
            .set(holiday_index, status, local_start, local_end, operating_mode)
    }

    // ── Pre-flight index checks ───────────────────────────────

    pub fn is_valid_user_index(&self, user_index: u16) -> bool {
        validation::is_valid_user_index(user_index)
    }

    pub fn is_valid_credential_index(
        &self,
        credential_index: u16,
        credential_type: CredentialType,
    ) -> bool {
        validation::is_valid_credential_index(credential_index, credential_type)
    }

    pub fn is_valid_weekday_schedule_index(&self, weekday_index: u8) -> bool {
        validation::is_valid_weekday_schedule_index(weekday_index)
    }

    pub fn is_valid_yearday_schedule_index(&self, yearday_index: u8) -> bool {
        validation::is_valid_yearday_schedule_index(yearday_index)
    }

    pub fn is_valid_holiday_schedule_index(&self, holiday_index: u8) -> bool {
        validation::is_valid_holiday_schedule_index(holiday_index)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> LockState {
        self.machine.state()
    }

    pub fn is_action_in_progress(&self) -> bool {
        self.machine.is_action_in_progress()
    }

    pub fn endpoint_id(&self) -> u16 {
        self.endpoint_id
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }
}

//! Facade tests: actuation flow, callbacks, policy delegation, seeding.

use std::sync::Mutex;

use boltcore::actuation::{Action, Actor, LockState};
use boltcore::adapters::{MemorySeed, SimTimer};
use boltcore::app::ports::{LockSeed, SeededCredential, SeededHoliday, SeededUser};
use boltcore::app::service::LockService;
use boltcore::config::{LockConfig, LockConfigBuilder};
use boltcore::error::{Error, OperationError, StoreError};
use boltcore::store::{
    CredentialRecord, CredentialStatus, CredentialType, HolidaySchedule, OperatingMode,
    ScheduleStatus, UserRecord, UserStatus,
};

use crate::mocks::{AllowAll, ExpectProof, MockTimer, RejectAll, TimerCall};

fn make_service(initial: Option<LockState>) -> LockService {
    LockService::new(1, initial, LockConfig::default()).unwrap()
}

// ── Lock/unlock cycle ─────────────────────────────────────────

#[test]
fn lock_from_unlocked_runs_the_full_cycle() {
    let mut service = make_service(Some(LockState::UnlockCompleted));
    let mut timer = SimTimer::new();

    service
        .lock(Actor::RemoteCommand, None, &AllowAll, &mut timer)
        .unwrap();
    assert_eq!(service.state(), LockState::LockInitiated);
    assert!(service.is_action_in_progress());
    assert_eq!(
        timer.armed_duration_ms(),
        Some(LockConfig::default().actuator_movement_ms)
    );

    // Completion arrives only when the platform delivers the timer fire.
    assert!(timer.take_fire());
    service.handle_actuation_complete();
    assert_eq!(service.state(), LockState::LockCompleted);
    assert!(!service.is_action_in_progress());
}

#[test]
fn overlapping_request_is_action_in_progress() {
    let mut service = make_service(Some(LockState::LockCompleted));
    let mut timer = SimTimer::new();

    service
        .unlock(Actor::Button, None, &AllowAll, &mut timer)
        .unwrap();
    assert_eq!(
        service.lock(Actor::RemoteCommand, None, &AllowAll, &mut timer),
        Err(OperationError::ActionInProgress)
    );
    // The in-flight unlock is unaffected.
    assert_eq!(service.state(), LockState::UnlockInitiated);
    timer.take_fire();
    service.handle_actuation_complete();
    assert_eq!(service.state(), LockState::UnlockCompleted);
}

#[test]
fn policy_rejection_reaches_the_caller_untouched() {
    let mut service = make_service(None);
    let mut timer = MockTimer::new();

    assert_eq!(
        service.unlock(
            Actor::RemoteCommand,
            Some(&[9, 9, 9]),
            &RejectAll(OperationError::Restricted),
            &mut timer,
        ),
        Err(OperationError::Restricted)
    );
    // No state change, no timer traffic.
    assert_eq!(service.state(), LockState::LockCompleted);
    assert!(timer.calls.is_empty());
}

#[test]
fn proof_comparison_is_delegated_to_the_policy() {
    let mut service = make_service(None);
    let mut timer = MockTimer::new();
    let policy = ExpectProof(vec![1, 2, 3, 4]);

    assert_eq!(
        service.unlock(Actor::RemoteCommand, Some(&[4, 3, 2, 1]), &policy, &mut timer),
        Err(OperationError::InvalidCredential)
    );
    service
        .unlock(Actor::RemoteCommand, Some(&[1, 2, 3, 4]), &policy, &mut timer)
        .unwrap();
    assert_eq!(timer.calls, vec![TimerCall::Start(2000)]);
}

// ── Callback registration ─────────────────────────────────────

static CALLBACK_LOG: Mutex<Vec<String>> = Mutex::new(Vec::new());

fn record_initiated(action: Action, actor: Actor) {
    CALLBACK_LOG
        .lock()
        .unwrap()
        .push(format!("initiated {action:?} by {actor:?}"));
}

fn record_completed(action: Action) {
    CALLBACK_LOG.lock().unwrap().push(format!("completed {action:?}"));
}

#[test]
fn cycle_fires_exactly_one_initiated_then_one_completed() {
    CALLBACK_LOG.lock().unwrap().clear();

    let mut service = make_service(Some(LockState::UnlockCompleted));
    let mut timer = SimTimer::new();
    service.set_callbacks(record_initiated, record_completed);

    service
        .lock(Actor::RemoteCommand, None, &AllowAll, &mut timer)
        .unwrap();
    timer.take_fire();
    service.handle_actuation_complete();

    let log = CALLBACK_LOG.lock().unwrap();
    assert_eq!(
        *log,
        vec![
            "initiated Lock by RemoteCommand".to_string(),
            "completed Lock".to_string(),
        ]
    );
}

static REPLACED_HITS: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

#[test]
fn reregistration_replaces_the_previous_pair() {
    fn old_initiated(_action: Action, _actor: Actor) {
        REPLACED_HITS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
    fn old_completed(_action: Action) {
        REPLACED_HITS.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
    fn silent_initiated(_action: Action, _actor: Actor) {}
    fn silent_completed(_action: Action) {}

    let mut service = make_service(Some(LockState::UnlockCompleted));
    let mut timer = SimTimer::new();

    // The old pair is registered first, then replaced.
    service.set_callbacks(old_initiated, old_completed);
    service.set_callbacks(silent_initiated, silent_completed);

    service
        .lock(Actor::Button, None, &AllowAll, &mut timer)
        .unwrap();
    timer.take_fire();
    service.handle_actuation_complete();
    assert_eq!(REPLACED_HITS.load(std::sync::atomic::Ordering::SeqCst), 0);
}

// ── Seeding ───────────────────────────────────────────────────

fn seeded_blob() -> Vec<u8> {
    let mut seed = LockSeed {
        lock_state: Some(LockState::UnlockCompleted),
        ..LockSeed::default()
    };

    let mut name = heapless::String::new();
    name.push_str("bob").unwrap();
    seed.users
        .push(SeededUser {
            index: 2,
            record: UserRecord {
                name,
                unique_id: 1001,
                status: UserStatus::OccupiedEnabled,
                credentials: heapless::Vec::new(),
                ..UserRecord::default()
            },
        })
        .unwrap();

    seed.credentials
        .push(SeededCredential {
            index: 11,
            record: CredentialRecord {
                status: CredentialStatus::Occupied,
                credential_type: CredentialType::Rfid,
                data: heapless::Vec::from_slice(&[0xAA, 0xBB]).unwrap(),
                owner: Some(2),
                created_by: 1,
                last_modified_by: 1,
            },
        })
        .unwrap();

    seed.holiday_schedules
        .push(SeededHoliday {
            slot: 1,
            record: HolidaySchedule {
                status: ScheduleStatus::Occupied,
                local_start: 100,
                local_end: 900,
                operating_mode: OperatingMode::Vacation,
            },
        })
        .unwrap();

    MemorySeed::encode(&seed).unwrap()
}

#[test]
fn init_seeds_stores_and_lock_state() {
    let mut service = make_service(None);
    service.init(&MemorySeed::from_blob(seeded_blob())).unwrap();

    // The persisted state supersedes the conservative default.
    assert_eq!(service.state(), LockState::UnlockCompleted);

    let user = service.get_user(2).unwrap();
    assert_eq!(user.name.as_str(), "bob");
    assert_eq!(user.unique_id, 1001);

    let credential = service.get_credential(11, CredentialType::Rfid).unwrap();
    assert_eq!(credential.owner, Some(2));
    assert_eq!(credential.data.as_slice(), &[0xAA, 0xBB]);

    let holiday = service.get_holiday_schedule(1).unwrap();
    assert_eq!(holiday.operating_mode, OperatingMode::Vacation);
}

#[test]
fn first_boot_seed_is_empty_and_keeps_initial_state() {
    let mut service = make_service(Some(LockState::LockCompleted));
    service.init(&MemorySeed::empty()).unwrap();
    assert_eq!(service.state(), LockState::LockCompleted);
    assert!(service.get_user(1).is_none());
}

#[test]
fn corrupted_seed_is_reported_to_the_init_caller() {
    let mut service = make_service(None);
    let result = service.init(&MemorySeed::from_blob(vec![0xFF; 16]));
    assert!(matches!(result, Err(Error::Seed(_))));
}

// ── Cross-store ownership ─────────────────────────────────────

#[test]
fn credential_for_absent_user_is_invalid_owner() {
    let mut service = make_service(None);
    assert_eq!(
        service.set_credential(
            5,
            0,
            0,
            CredentialStatus::Occupied,
            CredentialType::Pin,
            &[1, 2, 3, 4],
            Some(9),
        ),
        Err(StoreError::InvalidOwner)
    );
    assert!(service.get_credential(5, CredentialType::Pin).is_none());
}

#[test]
fn clearing_a_credential_skips_the_owner_check() {
    let mut service = make_service(None);
    // Owner 9 was never created, but a clear must still go through.
    service
        .set_credential(
            5,
            0,
            0,
            CredentialStatus::Available,
            CredentialType::Pin,
            &[],
            Some(9),
        )
        .unwrap();
}

// ── Configuration ─────────────────────────────────────────────

#[test]
fn custom_actuator_duration_reaches_the_timer() {
    let config = LockConfigBuilder::new().actuator_movement_ms(750).build();
    let mut service = LockService::new(3, Some(LockState::UnlockCompleted), config).unwrap();
    let mut timer = MockTimer::new();

    service
        .lock(Actor::LocalApp, None, &AllowAll, &mut timer)
        .unwrap();
    assert_eq!(timer.last_start_ms(), Some(750));
    assert_eq!(service.endpoint_id(), 3);
}

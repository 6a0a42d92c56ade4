//! Integration tests for the on-disk store, backups and configuration.
//!
//! These tests verify the workflow the CLI runs: onboard, log, score,
//! export, and import into a fresh database.

use habitual_core::date::parse_date;
use habitual_core::onboarding::{complete_onboarding, AlcoholFrequency};
use habitual_core::{BackupData, Config, Database, DailyLog, SurveyAnswers};

#[test]
fn test_onboard_log_and_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("habitual.db");

    let answers = SurveyAnswers {
        alcohol_freq: AlcoholFrequency::Often,
        ..Default::default()
    };
    let (profile, habits) = complete_onboarding("Ana", answers).unwrap();
    let date = parse_date("2024-05-06").unwrap();
    {
        let mut db = Database::open_at(&path).unwrap();
        db.save_profile(&profile).unwrap();
        db.save_habits(&habits).unwrap();

        let mut log = db.load_log().unwrap();
        log.toggle("sleep_7h", date, true);
        log.toggle("limit_alcohol", date, true);
        db.save_day("2024-05-06", log.day(date)).unwrap();
    }

    let db = Database::open_at(&path).unwrap();
    assert_eq!(db.load_profile().unwrap(), Some(profile));
    let loaded = db.load_habits().unwrap();
    assert_eq!(loaded, habits);
    assert!(loaded.get("limit_alcohol").unwrap().is_max_type());

    let log = db.load_log().unwrap();
    assert!(log.is_logged("sleep_7h", date));
    assert!(log.is_logged("limit_alcohol", date));

    let engine = Config::default().engine();
    let score = engine.daily_score(loaded.as_slice(), &log, date);
    assert!(score > 0 && score < 100);
}

#[test]
fn test_backup_roundtrip_between_databases() {
    let dir = tempfile::tempdir().unwrap();
    let (profile, habits) = complete_onboarding("Bo", SurveyAnswers::default()).unwrap();
    let mut log = DailyLog::new();
    log.set_mood(parse_date("2024-05-01").unwrap(), 5).unwrap();

    let mut src = Database::open_at(&dir.path().join("a.db")).unwrap();
    src.replace_all(Some(&profile), &habits, &log).unwrap();

    let backup_path = dir.path().join("backup.json");
    BackupData::export(&src).unwrap().write_to(&backup_path).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&backup_path).unwrap()).unwrap();
    assert_eq!(raw["logs"]["2024-05-01"]["mood"], 5);
    assert_eq!(raw["profile"]["onboardingCompleted"], true);
    assert!(raw["habits"][0]["frequencyType"].is_string());

    let mut dst = Database::open_at(&dir.path().join("b.db")).unwrap();
    BackupData::read_from(&backup_path).unwrap().import(&mut dst).unwrap();
    assert_eq!(dst.load_habits().unwrap(), habits);
    assert_eq!(dst.load_log().unwrap(), log);
}

#[test]
fn test_config_drives_engine_policy() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    let mut cfg = Config::load_from(&path).unwrap();
    cfg.set_value("scoring.include_disabled", "true").unwrap();
    cfg.set_value("analytics.window_days", "14").unwrap();
    cfg.save_to(&path).unwrap();

    let cfg = Config::load_from(&path).unwrap();
    assert!(cfg.engine().policy().include_disabled);
    let series = cfg.analytics().consistency_series(&[], &DailyLog::new(), parse_date("2024-05-14").unwrap());
    assert_eq!(series.len(), 14);
    assert_eq!(series[0].date, "2024-05-01");
}

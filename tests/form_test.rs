//! Tests for the lateral raise form analyzer


use fitness_counter::config::FormConfig;
use fitness_counter::form::{FormStatus, IssueCode, LateralRaiseFormAnalyzer};
use fitness_counter::landmarks::PoseFrame;
use std::time::Duration;
use test_helpers::UpperBodyPose;

fn analyzer() -> LateralRaiseFormAnalyzer {
    LateralRaiseFormAnalyzer::new(FormConfig::default()).unwrap()
}

#[test]
fn test_sustained_shrug_is_bad() {
    let mut analyzer = analyzer();
    let relaxed = UpperBodyPose::default();
    for i in 0..5 {
        analyzer.analyze(&relaxed.frame(i));
    }

    let shrugged = UpperBodyPose {
        neck: 0.02,
        ..UpperBodyPose::raised()
    };
    let mut last = None;
    for i in 5..35 {
        last = Some(analyzer.analyze(&shrugged.frame(i)));
    }

    let feedback = last.unwrap();
    assert_eq!(feedback.status, FormStatus::Bad);
    let issue = feedback.issue(IssueCode::Shrugging).unwrap();
    assert_eq!(issue.severity, FormStatus::Bad);
}

#[test]
fn test_brief_shrug_is_only_a_warning() {
    let mut analyzer = analyzer();
    for i in 0..5 {
        analyzer.analyze(&UpperBodyPose::default().frame(i));
    }
    let shrugged = UpperBodyPose {
        neck: 0.02,
        ..UpperBodyPose::raised()
    };
    let feedback = (5..10).map(|i| analyzer.analyze(&shrugged.frame(i))).last().unwrap();
    assert_eq!(feedback.issue(IssueCode::Shrugging).unwrap().severity, FormStatus::Warning);
}

#[test]
fn test_relaxed_frame_only_decays_shrug_streak() {
    let config = FormConfig {
        smoothing_factor: 1.0,
        ..FormConfig::default()
    };
    let mut analyzer = LateralRaiseFormAnalyzer::new(config).unwrap();
    let shrugged = UpperBodyPose {
        neck: 0.02,
        ..UpperBodyPose::raised()
    };

    for i in 0..5 {
        analyzer.analyze(&UpperBodyPose::default().frame(i));
    }
    for i in 5..14 {
        let feedback = analyzer.analyze(&shrugged.frame(i));
        assert_eq!(feedback.issue(IssueCode::Shrugging).unwrap().severity, FormStatus::Warning);
    }

    // One relaxed frame with the arms still up
    let relaxed = analyzer.analyze(&UpperBodyPose::raised().frame(14));
    assert!(!relaxed.has_issue(IssueCode::Shrugging));
    assert_eq!(relaxed.metrics.get("shrug_streak"), Some(&8.0));

    let first = analyzer.analyze(&shrugged.frame(15));
    assert_eq!(first.issue(IssueCode::Shrugging).unwrap().severity, FormStatus::Warning);
    let second = analyzer.analyze(&shrugged.frame(16));
    assert_eq!(second.issue(IssueCode::Shrugging).unwrap().severity, FormStatus::Bad);
}

#[test]
fn test_strongly_bent_elbow_is_bad_immediately() {
    let mut analyzer = analyzer();
    let bent = UpperBodyPose {
        elbow: 100.0,
        ..UpperBodyPose::raised()
    };
    let feedback = analyzer.analyze(&bent.frame(0));
    assert_eq!(feedback.status, FormStatus::Bad);
    assert!(feedback.has_issue(IssueCode::ElbowBent));
}

#[test]
fn test_elbow_warning_needs_a_streak_and_latches() {
    let mut analyzer = analyzer();
    let soft = UpperBodyPose {
        elbow: 140.0,
        ..UpperBodyPose::raised()
    };
    for i in 0..4 {
        assert!(!analyzer.analyze(&soft.frame(i)).has_issue(IssueCode::ElbowBent));
    }
    let feedback = analyzer.analyze(&soft.frame(4));
    assert_eq!(feedback.issue(IssueCode::ElbowBent).unwrap().severity, FormStatus::Warning);

    // Between the enter and exit angles the warning holds
    let almost = UpperBodyPose {
        elbow: 155.0,
        ..UpperBodyPose::raised()
    };
    for i in 5..25 {
        assert!(analyzer.analyze(&almost.frame(i)).has_issue(IssueCode::ElbowBent));
    }

    let straight = UpperBodyPose::raised();
    let feedback = (25..45).map(|i| analyzer.analyze(&straight.frame(i))).last().unwrap();
    assert!(!feedback.has_issue(IssueCode::ElbowBent));
}

#[test]
fn test_elbow_rules_ignore_lowered_arms() {
    let mut analyzer = analyzer();
    let bent = UpperBodyPose {
        elbow: 100.0,
        ..UpperBodyPose::default()
    };
    for i in 0..10 {
        let feedback = analyzer.analyze(&bent.frame(i));
        assert!(!feedback.has_issue(IssueCode::ElbowBent));
        assert_eq!(feedback.metrics.get("active"), Some(&0.0));
    }
}

#[test]
fn test_small_sideways_shift_warns() {
    let mut analyzer = analyzer();
    let shifted = UpperBodyPose {
        shift: 0.04,
        ..UpperBodyPose::default()
    };
    let feedback = analyzer.analyze(&shifted.frame(0));
    assert_eq!(feedback.issue(IssueCode::TrunkShift).unwrap().severity, FormStatus::Warning);
    assert!(!feedback.has_issue(IssueCode::TrunkLean));
    assert_eq!(feedback.status, FormStatus::Warning);
}

#[test]
fn test_large_lean_is_bad() {
    let mut analyzer = analyzer();
    let leaning = UpperBodyPose {
        shift: 0.2,
        ..UpperBodyPose::default()
    };
    let feedback = analyzer.analyze(&leaning.frame(0));
    assert_eq!(feedback.status, FormStatus::Bad);
    assert_eq!(feedback.issue(IssueCode::TrunkLean).unwrap().severity, FormStatus::Bad);
    assert_eq!(feedback.issue(IssueCode::TrunkShift).unwrap().severity, FormStatus::Bad);
}

#[test]
fn test_empty_frame_is_low_confidence() {
    let mut analyzer = analyzer();
    let feedback = analyzer.analyze(&PoseFrame::new(Duration::ZERO));
    assert!(feedback.has_issue(IssueCode::LowConfidence));
    assert_eq!(feedback.issues.len(), 1);
}

#[test]
fn test_issue_codes_serialize_as_constants() {
    assert_eq!(IssueCode::Shrugging.to_string(), "SHRUGGING");
    assert_eq!(serde_yaml::to_string(&IssueCode::ElbowBent).unwrap().trim(), "ELBOW_BENT");
    assert_eq!(serde_yaml::to_string(&FormStatus::Warning).unwrap().trim(), "warning");
}

use panguan_pipeline::{
    build_root_pipeline,
    router::UNABLE_TO_PARSE,
    stages::OfflineSearch,
    state::{Route, VerificationStatus},
    PipelineState,
    Stage,
};
use pretty_assertions::assert_eq;

fn run(question: &str) -> PipelineState {
    build_root_pipeline(Box::new(OfflineSearch)).run(question, PipelineState::new("sess-test"))
}

#[test]
fn integral_question() {
    let state = run("Compute ∫_0^1 x^2 dx");
    let solver = state.solver_output().unwrap();
    assert_eq!(solver.routed_by, Route::IntegralPhrase);
    assert_eq!(solver.final_answer, "1/3");

    let report = state.verification_report().unwrap();
    assert_eq!(report.status, VerificationStatus::Passed);
    assert_eq!(report.details.len(), 1);
    assert!(report.details[0].starts_with("Numeric evaluation: 0.333"));
}

#[test]
fn quadratic_question() {
    let state = run("Solve x^2 - 5x + 6 = 0");
    let answer = &state.solver_output().unwrap().final_answer;
    assert!(answer.contains('2') && answer.contains('3'));
    assert_eq!(state.verification_report().unwrap().status, VerificationStatus::Passed);
}

#[test]
fn limit_question() {
    let state = run("limit((1+1/n)**n, n, oo)");
    let report = state.verification_report().unwrap();
    assert_eq!(report.status, VerificationStatus::Passed);

    let value = report.details[0]
        .strip_prefix("Numeric evaluation: ")
        .unwrap()
        .parse::<f64>()
        .unwrap();
    assert!((value - std::f64::consts::E).abs() < 1e-3);
}

#[test]
fn batch_of_three_writeups() {
    let pipeline = build_root_pipeline(Box::new(OfflineSearch));
    for question in ["Compute ∫_0^1 x^2 dx", "Solve x^2 - 5x + 6 = 0", "limit((1+1/n)**n, n, oo)"] {
        let state = pipeline.run(question, PipelineState::new("sess-batch"));
        let writeup = state.final_writeup().unwrap();
        for header in ["### Plan", "### Derivation Steps", "### Research Notes", "### Verification", "### Final Answer"] {
            assert!(writeup.contains(header), "{} is missing {}", question, header);
        }
        let answer = &state.solver_output().unwrap().final_answer;
        assert!(!answer.is_empty());
        assert!(writeup.ends_with(&format!("\\boxed{{{}}}", answer)));
        assert_eq!(state.verification_report().unwrap().status, VerificationStatus::Passed);
    }
}

#[test]
fn unparseable_question_is_not_a_failure() {
    let state = run("Find the general solution to y'' - y = 0 and verify initial conditions y(0)=1, y'(0)=0");
    let solver = state.solver_output().unwrap();
    assert_eq!(solver.derivation_steps, [UNABLE_TO_PARSE]);
    assert_eq!(solver.final_answer, "");

    let report = state.verification_report().unwrap();
    assert_eq!(report.status, VerificationStatus::Passed);
    assert!(report.details.is_empty());
    assert!(state.final_writeup().unwrap().ends_with(r"\boxed{}"));
}

#[test]
fn every_stage_writes_its_field() {
    let state = run("x + x");
    assert_eq!(state.session_id(), "sess-test");
    assert_eq!(state.version(), 5);
    assert!(state.plan().is_some());
    assert!(state.research_output().is_some());

    let json = serde_json::to_value(&state).unwrap();
    assert_eq!(json["solver_output"]["routed_by"], "fallback");
    assert_eq!(json["solver_output"]["final_answer"], "2*x");
    assert_eq!(json["research_output"]["citations"], serde_json::json!([]));
}

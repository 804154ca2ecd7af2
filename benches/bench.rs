// Criterion benchmarks for Compass Rank

use compass_rank::core::{compare, score_candidate, Recommender, ScoringPolicy};
use compass_rank::models::{Candidate, PreferenceSet};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const COUNTRIES: [&str; 5] = ["Spain", "Japan", "Italy", "Ghana", "Chile"];
const TAGS: [&str; 6] = ["culture", "internship", "research", "language", "food", "art"];

fn create_candidate(id: usize) -> Candidate {
    Candidate {
        id: format!("program-{:05}", id),
        name: format!("Program {}", id),
        provider: Some("Provider".to_string()),
        country: COUNTRIES[id % COUNTRIES.len()].to_string(),
        city: "City".to_string(),
        region: Some(if id % 2 == 0 { "Europe" } else { "Asia" }.to_string()),
        description: None,
        duration_weeks: Some(8 + (id % 12) as u32),
        duration_type: Some(if id % 3 == 0 { "summer" } else { "semester" }.to_string()),
        credits_min: Some(6),
        credits_max: Some(15),
        gpa_requirement: if id % 4 == 0 { Some(3.0) } else { None },
        language_requirement: None,
        program_fee: None,
        housing_included: id % 2 == 1,
        estimated_total_cost: 6_000 + (id as u32 % 20) * 1_000,
        internship_available: id % 3 == 1,
        research_opportunities: id % 5 == 0,
        excursions_included: id % 2 == 0,
        program_url: None,
        application_url: None,
        academic_fields: vec!["Business".to_string()],
        tags: TAGS
            .iter()
            .skip(id % TAGS.len())
            .take(2)
            .map(|t| t.to_string())
            .collect(),
    }
}

fn create_preferences() -> PreferenceSet {
    PreferenceSet {
        interests: vec!["culture".to_string(), "internship".to_string(), "food".to_string()],
        countries: vec!["Spain".to_string()],
        regions: vec!["Europe".to_string()],
        academic_fields: vec!["Business".to_string()],
        budget_max: Some(20_000.0),
        gpa: Some(3.2),
        ..Default::default()
    }
}

fn bench_score_candidate(c: &mut Criterion) {
    let policy = ScoringPolicy::default();
    let preferences = create_preferences();
    let candidate = create_candidate(1);

    c.bench_function("score_candidate", |b| {
        b.iter(|| score_candidate(black_box(&candidate), black_box(&preferences), &policy));
    });
}

fn bench_recommend(c: &mut Criterion) {
    let recommender = Recommender::default();
    let preferences = create_preferences();

    let mut group = c.benchmark_group("recommend");

    for candidate_count in [10, 100, 1000, 10_000].iter() {
        let candidates: Vec<Candidate> = (0..*candidate_count).map(create_candidate).collect();

        group.bench_with_input(
            BenchmarkId::new("score_and_rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| {
                    recommender.score_and_rank(
                        black_box(&candidates),
                        black_box(&preferences),
                        black_box(8),
                    )
                });
            },
        );
    }

    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let policy = ScoringPolicy::default();
    let candidates: Vec<Candidate> = (0..3).map(create_candidate).collect();
    let refs: Vec<&Candidate> = candidates.iter().collect();

    c.bench_function("compare_three_programs", |b| {
        b.iter(|| compare(black_box(&refs), &policy));
    });
}

criterion_group!(benches, bench_score_candidate, bench_recommend, bench_compare);

criterion_main!(benches);

//! Property-based tests
//!
//! Invariants that should hold for all inputs:
//! - Propagation: tags only grow, mutual propagation equalizes
//! - History: a read sees the latest earlier write of its own method
//! - Driver: copy chains preserve literals; runs always terminate

mod common;

use codegraph_provenance::features::symbolic_execution::domain::ContextualValues;
use codegraph_provenance::features::symbolic_execution::infrastructure::{
    propagate_mutually, propagate_tags, tags_of,
};
use codegraph_provenance::features::symbolic_execution::ValueContext;
use codegraph_provenance::{
    EngineConfig, MethodSignature, Preset, ProgramPoint, ProgramValue, SymbolicExecution,
    SymbolicValueId, SymbolicValueKind,
};
use common::*;
use proptest::prelude::*;

const TAGS: &[&str] = &["#now", "#here", "#sms", "#hour", "#latitude", "#equals:STOP"];

fn method() -> MethodSignature {
    MethodSignature::of("com.app.Main", "run", &[], "void")
}

/// One unknown value per tag set
fn seeded(tag_sets: &[Vec<usize>]) -> (ValueContext, Vec<SymbolicValueId>) {
    let mut ctx = ValueContext::new();
    let ids = tag_sets
        .iter()
        .enumerate()
        .map(|(i, set)| {
            let id = ctx.intern(
                &ProgramPoint::new(method(), i),
                SymbolicValueKind::Unknown { label: format!("v{}", i) },
            );
            for tag in set {
                ctx.add_tag(id, TAGS[*tag]);
            }
            id
        })
        .collect();
    (ctx, ids)
}

fn tag_sets() -> impl Strategy<Value = Vec<Vec<usize>>> {
    prop::collection::vec(prop::collection::vec(0..TAGS.len(), 0..4), 1..8)
}

proptest! {
    #[test]
    fn prop_mutual_propagation_equalizes(sets in tag_sets()) {
        let (mut ctx, ids) = seeded(&sets);
        let union = tags_of(&ctx, &ids);
        propagate_mutually(&mut ctx, &ids);
        for id in &ids {
            prop_assert_eq!(&ctx.tags(*id), &union);
        }
        // idempotent
        prop_assert!(!propagate_mutually(&mut ctx, &ids));
    }

    #[test]
    fn prop_propagation_only_grows(sets in tag_sets(), split in 0usize..8) {
        let (mut ctx, ids) = seeded(&sets);
        let split = split.min(ids.len());
        let (from, to) = ids.split_at(split);
        let before: Vec<_> = ids.iter().map(|id| ctx.tags(*id)).collect();

        propagate_tags(&mut ctx, from, to);
        for (id, old) in ids.iter().zip(&before) {
            prop_assert!(ctx.tags(*id).is_superset(old));
        }
        for id in from {
            prop_assert_eq!(ctx.tags(*id), before[id.index()].clone());
        }
        let sources = tags_of(&ctx, from);
        for id in to {
            prop_assert!(ctx.tags(*id).is_superset(&sources));
        }
    }

    #[test]
    fn prop_read_sees_latest_earlier_write(
        writes in prop::collection::btree_set(0usize..40, 1..10),
        read_at in 0usize..41,
    ) {
        let m = method();
        let mut ctx = ValueContext::new();
        let mut written = std::collections::BTreeMap::new();
        let mut history = ContextualValues::new(ProgramValue::local(&m, "r0", "java.lang.String"));
        for index in &writes {
            let point = ProgramPoint::new(m.clone(), *index);
            let id = ctx.intern(&point, SymbolicValueKind::Unknown { label: format!("w{}", index) });
            written.insert(*index, id);
            history.record(point, vec![id]);
        }

        let seen = history.last_coherent_values(Some(&ProgramPoint::new(m.clone(), read_at)));
        let expected: Vec<SymbolicValueId> = written
            .range(..read_at)
            .next_back()
            .map(|(_, id)| vec![*id])
            .unwrap_or_default();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn prop_copy_chain_preserves_literal(text in "[a-zA-Z0-9+]{0,12}", length in 1usize..12) {
        let builder = MethodBuilder::new(app_method("run", &[], "void"));
        let locals: Vec<ProgramValue> = (0..=length)
            .map(|i| builder.local(&format!("r{}", i), STRING))
            .collect();
        let sig = builder.signature().clone();

        let mut builder = builder.copy(&locals[0], string(&text));
        for pair in locals.windows(2) {
            builder = builder.copy(&pair[1], pair[0].clone());
        }
        let icfg = ProgramBuilder::new().with_method(builder.ret(None)).build();

        let result = SymbolicExecution::new(&icfg, EngineConfig::default()).analyze(&[sig]).unwrap();
        prop_assert_eq!(constants_of(&result, &locals[length]), vec![text]);
    }

    #[test]
    fn prop_call_chains_terminate_within_budget(depth in 1usize..10, visits in 1usize..4) {
        // m0 -> m1 -> ... -> m{depth}, each returning its callee's result
        let sigs: Vec<MethodSignature> = (0..=depth)
            .map(|i| app_method(&format!("m{}", i), &[], "long"))
            .collect();
        let mut program = ProgramBuilder::new();
        for (i, sig) in sigs.iter().enumerate() {
            let m = MethodBuilder::new(sig.clone());
            let l0 = m.local("l0", "long");
            let callee = match sigs.get(i + 1) {
                Some(next) => static_call(next.clone(), vec![]),
                None => static_call(api("java.lang.System", "nanoTime", &[], "long"), vec![]),
            };
            program = program.with_method(m.call(&l0, callee).ret(Some(&l0)));
        }
        let icfg = program.build();

        let config = EngineConfig::preset(Preset::Fast).max_visits_per_method(visits);
        let result = SymbolicExecution::new(&icfg, config).analyze(&[sigs[0].clone()]).unwrap();
        for sig in &sigs {
            prop_assert!(result.stats().visits_of(sig) <= visits);
            prop_assert!(result.stats().visits_of(sig) >= 1);
        }
    }
}

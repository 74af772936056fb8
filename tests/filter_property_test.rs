// ==========================================
// 工作流属性测试
// ==========================================
// 测试范围:
// 1. 筛选结果单调（搜索词延长不会增加结果）
// 2. 编号/显示代码/位置的任意子串都能命中所属电解槽
// 3. 协调结果总在筛选结果内
// 4. 任意意图序列下勾选集合只包含可选元件
// 5. 已提交元件在任意意图序列下保持终态
// ==========================================

mod test_helpers;

use electrolyzer_disassembly::api::DisassemblyApi;
use electrolyzer_disassembly::domain::catalog::Catalog;
use electrolyzer_disassembly::domain::types::{ElementAction, PartStatus};
use electrolyzer_disassembly::engine::{filter_units, reconcile_active};
use proptest::prelude::*;

// ===== 策略 =====

/// 目录中编号、显示代码、位置字段的全部子串（目录数据为 ASCII）
fn field_substrings() -> Vec<String> {
    let mut out = Vec::new();
    for unit in Catalog::builtin().units {
        for field in [unit.id.to_string(), unit.tag, unit.location_label] {
            for start in 0..field.len() {
                for end in start + 1..=field.len() {
                    out.push(field[start..end].to_string());
                }
            }
        }
    }
    out.sort();
    out.dedup();
    out
}

/// 字段子串（随机大小写、随机首尾空白）为主,少量随机串
fn arb_term() -> impl Strategy<Value = String> {
    let substring = (
        prop::sample::select(field_substrings()),
        any::<bool>(),
        "[ ]{0,2}",
    )
        .prop_map(|(term, upper, pad)| {
            let term = if upper { term.to_uppercase() } else { term };
            format!("{}{}{}", pad, term, pad)
        });

    prop_oneof![
        4 => substring,
        1 => "[a-zA-Z0-9 -]{0,6}",
    ]
}

fn arb_unit_id() -> impl Strategy<Value = u32> {
    prop_oneof![
        Just(6310u32),
        Just(6345u32),
        Just(6350u32),
        Just(6388u32),
        Just(6392u32),
    ]
}

fn arb_part_id() -> impl Strategy<Value = String> {
    prop::sample::select(
        Catalog::builtin()
            .parts
            .into_iter()
            .map(|p| p.id)
            .collect::<Vec<_>>(),
    )
}

#[derive(Debug, Clone)]
enum Intent {
    Search(String),
    SelectUnit(u32),
    Toggle(u32, String),
    SelectAll(u32),
    ClearAll(u32),
    Checklist(String),
    Request(ElementAction),
    Confirm,
    Cancel,
}

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        arb_term().prop_map(Intent::Search),
        arb_unit_id().prop_map(Intent::SelectUnit),
        (arb_unit_id(), arb_part_id()).prop_map(|(u, p)| Intent::Toggle(u, p)),
        arb_unit_id().prop_map(Intent::SelectAll),
        arb_unit_id().prop_map(Intent::ClearAll),
        Just(Intent::Checklist("Hydrogen Box".to_string())),
        Just(Intent::Checklist("Gasket surface".to_string())),
        Just(Intent::Request(ElementAction::Repair)),
        Just(Intent::Request(ElementAction::Assemble)),
        Just(Intent::Confirm),
        Just(Intent::Cancel),
    ]
}

/// 执行意图（错误是合法结果,只检查状态不变量）
fn apply(api: &mut DisassemblyApi, intent: &Intent) {
    let _ = match intent {
        Intent::Search(term) => api.set_search_term(term).map(|_| ()),
        Intent::SelectUnit(unit_id) => api.select_unit(*unit_id).map(|_| ()),
        Intent::Toggle(unit_id, part_id) => api.toggle_part_on(*unit_id, part_id).map(|_| ()),
        Intent::SelectAll(unit_id) => api.select_all(*unit_id).map(|_| ()),
        Intent::ClearAll(unit_id) => api.clear_all(*unit_id).map(|_| ()),
        Intent::Checklist(label) => api.toggle_checklist_item(label).map(|_| ()),
        Intent::Request(action) => api.request_action(*action).map(|_| ()),
        Intent::Confirm => api.confirm_action().map(|_| ()),
        Intent::Cancel => api.cancel_action().map(|_| ()),
    };
}

// ===== 属性 =====

proptest! {
    #[test]
    fn filter_is_monotonic(base in arb_term(), suffix in arb_term()) {
        let catalog = Catalog::builtin();
        let wide = filter_units(&catalog.units, &base);
        let narrow = filter_units(&catalog.units, &format!("{}{}", base, suffix));

        for unit in &narrow {
            prop_assert!(wide.iter().any(|u| u.id == unit.id));
        }
    }

    #[test]
    fn field_substring_always_matches(term in prop::sample::select(field_substrings())) {
        let catalog = Catalog::builtin();
        let owners: Vec<u32> = catalog
            .units
            .iter()
            .filter(|u| {
                u.id.to_string().contains(&term)
                    || u.tag.contains(&term)
                    || u.location_label.contains(&term)
            })
            .map(|u| u.id)
            .collect();
        prop_assert!(!owners.is_empty());

        // 大小写不敏感,首尾空白忽略
        let filtered = filter_units(&catalog.units, &format!(" {} ", term.to_uppercase()));
        for id in owners {
            prop_assert!(filtered.iter().any(|u| u.id == id));
        }
    }

    #[test]
    fn reconcile_stays_within_filtered(term in arb_term(), current in proptest::option::of(arb_unit_id())) {
        let catalog = Catalog::builtin();
        let filtered = filter_units(&catalog.units, &term);
        let active = reconcile_active(&filtered, &term, current);

        match active {
            None => prop_assert!(filtered.is_empty()),
            Some(id) => prop_assert!(filtered.iter().any(|u| u.id == id)),
        }
    }

    #[test]
    fn selection_only_holds_enabled_parts(intents in prop::collection::vec(arb_intent(), 0..40)) {
        let mut api = test_helpers::builtin_api();
        for intent in &intents {
            apply(&mut api, intent);

            for entry in api.selection().all_selected_entries() {
                let part = api.fleet().part(entry.unit_id, &entry.part_id);
                prop_assert!(part.is_some_and(|p| !p.disabled));
            }

            // 检查项只在当前电解槽有勾选时保留
            let active_has_selection = api
                .active_unit_id()
                .map(|id| api.selection().has_selection(id))
                .unwrap_or(false);
            if !active_has_selection {
                prop_assert!(api.selection().selected_checklist().is_empty());
            }
        }
    }

    #[test]
    fn committed_part_stays_terminal(intents in prop::collection::vec(arb_intent(), 0..40)) {
        let mut api = test_helpers::builtin_api();
        api.toggle_part_on(6310, "TC080").unwrap();
        api.request_action(ElementAction::Assemble).unwrap();
        api.confirm_action().unwrap();

        for intent in &intents {
            apply(&mut api, intent);
        }

        let part = api.fleet().part(6310, "TC080").unwrap();
        prop_assert_eq!(part.status, PartStatus::ReadyToAssemble);
        prop_assert!(part.disabled);
        prop_assert!(!api.selection().is_selected(6310, "TC080"));
    }
}

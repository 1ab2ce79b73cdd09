use de::*;
use devach_engine as de;
use std::collections::BTreeSet;

#[test]
fn test_parse_reports_invalid_syntax() {
    let err = parse_python("def broken(:\n    pass\n").err().expect("invalid syntax is rejected");
    assert!(matches!(err, de::syntax::SyntaxError::Invalid { .. }));
}

#[test]
fn test_index_counts_nodes() {
    let index = index_source("x = 1\ny = x + 2\n").expect("parses");
    assert_eq!(index.count(NodeKind::Assign), 2);
    assert!(index.contains(NodeKind::Add));
    assert!(!index.contains(NodeKind::For));
}

#[test]
fn test_achievement_display() {
    let graph = AchievementGraph::from_catalog(&BTreeSet::from([AchievementId::List])).expect("catalog");
    let list = graph.get(AchievementId::List).expect("defined");
    assert_eq!(list.to_string(), "Achievement ListAchievement: Lists! (unlocked)");
    let dict = graph.get(AchievementId::Dict).expect("defined");
    assert_eq!(dict.to_string(), "Achievement DictAchievement: Dictionaries! (locked)");
}

#[test]
fn test_definition_lookup() {
    for id in AchievementId::ALL {
        let def = definition(id).expect("every id is in the catalog");
        assert_eq!(def.id, id);
        assert!(!def.title.is_empty());
    }
}

#[test]
fn test_unlock_message() {
    assert_eq!(unlock_message("Loops!"), "Achievement Unlocked: Loops!");
}

#[test]
fn test_id_names_parse_back() {
    let id: AchievementId = "FunctionAchievement".parse().expect("known name");
    assert_eq!(id, AchievementId::Function);
    assert!("ForLoopAchievement".parse::<AchievementId>().is_err());
}

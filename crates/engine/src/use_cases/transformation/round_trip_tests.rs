//! Apply/revert round trips against the in-memory store.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use morphin_domain::value_objects::{total_for, Ability, Sense, SenseKind};
use morphin_domain::{
    AbilityScores, BuffKind, Catalog, ChangeTarget, CharacterId, CharacterItem, CharacterRecord,
    EffectCategory, EnglishLabels, EquipmentData, EquipmentType, ItemKind, SizeCategory, SpellKind,
};

use super::{PolymorphRequest, TransformError, TransformationRequest};
use crate::app::App;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::memory_store::InMemoryCharacterStore;
use crate::infrastructure::ports::CharacterStore;
use crate::infrastructure::selection::FixedSelection;

fn app(store: Arc<InMemoryCharacterStore>, id: CharacterId) -> App {
    App::new(
        store,
        Arc::new(FixedSelection::single(id)),
        None,
        Arc::new(EnglishLabels),
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())),
        Arc::new(Catalog::builtin().unwrap()),
    )
}

fn armor(name: &str, kind: EquipmentType, value: i32) -> CharacterItem {
    CharacterItem::new(
        name,
        ItemKind::Equipment(EquipmentData {
            equipment_type: kind,
            armor_value: value,
            equipped: true,
        }),
    )
}

fn adventurer(size: SizeCategory, strength: i32) -> CharacterRecord {
    let mut character = CharacterRecord::new(
        "Harsk",
        size,
        AbilityScores::default().with(Ability::Str, strength),
    )
    .with_item(armor("Chain Shirt", EquipmentType::Armor, 4))
    .with_item(armor("Heavy Shield", EquipmentType::Shield, 3));
    character.traits.damage_reduction = "2/-".into();
    character.traits.senses = vec![Sense::new(SenseKind::Darkvision, 60)];
    character.traits.speeds.land = Some(20);
    character.carry.user_bonus = 2;
    character
}

fn setup(character: CharacterRecord) -> (Arc<InMemoryCharacterStore>, App, CharacterId) {
    let id = character.id;
    let store = Arc::new(InMemoryCharacterStore::new().with_character(character));
    let app = app(store.clone(), id);
    (store, app, id)
}

async fn load(store: &InMemoryCharacterStore, id: CharacterId) -> CharacterRecord {
    store.get(id).await.unwrap().unwrap()
}

fn assert_same_capacity(before: &CharacterRecord, after: &CharacterRecord) {
    let (a, b) = (
        before.effective_carry_capacity(),
        after.effective_carry_capacity(),
    );
    assert!((a - b).abs() < 1e-6, "{} carried {} before, {} after", after.name, a, b);
}

#[tokio::test]
async fn reduce_person_on_medium_character_records_original_size() {
    let character = CharacterRecord::new(
        "Valeros",
        SizeCategory::Medium,
        AbilityScores::default().with(Ability::Str, 10),
    );
    let (store, app, id) = setup(character.clone());

    let snapshot = app
        .use_cases
        .transform(&TransformationRequest::Buff {
            kind: BuffKind::ReducePerson,
            caster_level: 1,
        })
        .await
        .unwrap();

    let reduced = load(&store, id).await;
    assert_eq!(reduced.size, SizeCategory::Small);
    assert_eq!(snapshot.size, SizeCategory::Medium);
    assert_eq!(reduced.snapshot(), Some(&snapshot));
    let container = reduced.find_buff("Reduce Person").and_then(|i| i.buff()).unwrap();
    assert!(container.active);
    assert_eq!(total_for(&container.changes, ChangeTarget::CarryStrength), 2.0);
    assert!(container
        .changes
        .iter()
        .any(|c| c.target() == ChangeTarget::CarryMultiplier));
    assert_same_capacity(&character, &reduced);
}

#[tokio::test]
async fn leaving_tiny_doubles_armor_and_revert_restores_it() {
    let character = CharacterRecord::new("Pip", SizeCategory::Tiny, AbilityScores::default())
        .with_item(armor("Padded", EquipmentType::Armor, 4));
    let armor_id = character.items[0].id;
    let (store, app, id) = setup(character);

    let snapshot = app
        .use_cases
        .cast_buff
        .execute(BuffKind::EnlargePerson, 1)
        .await
        .unwrap();
    let grown = load(&store, id).await;
    assert_eq!(grown.size, SizeCategory::Small);
    assert_eq!(
        grown.item(armor_id).and_then(|i| i.equipment()).map(|e| e.armor_value),
        Some(8)
    );
    assert_eq!(snapshot.original_armor(armor_id), Some(4));

    app.use_cases.revert_selected().await.unwrap();
    let restored = load(&store, id).await;
    assert_eq!(restored.size, SizeCategory::Tiny);
    assert_eq!(
        restored.item(armor_id).and_then(|i| i.equipment()).map(|e| e.armor_value),
        Some(4)
    );
}

#[tokio::test]
async fn every_buff_round_trips() {
    for kind in BuffKind::ALL {
        for size in [SizeCategory::Tiny, SizeCategory::Medium, SizeCategory::Huge] {
            let before = adventurer(size, 13);
            let (store, app, id) = setup(before.clone());

            app.use_cases.cast_buff.execute(kind, 9).await.unwrap();
            let during = load(&store, id).await;
            assert_same_capacity(&before, &during);

            app.use_cases.revert.execute(id).await.unwrap();
            let after = load(&store, id).await;
            assert_eq!(after.size, before.size, "{}", kind);
            assert_eq!(after.traits, before.traits, "{}", kind);
            assert_eq!(after.snapshot(), None);
            for item in before.armor_and_shields() {
                assert_eq!(after.item(item.id), Some(item), "{}", kind);
            }
            let container = after.find_buff(kind.display_name()).and_then(|i| i.buff());
            assert_eq!(container.map(|b| b.active), Some(false));
        }
    }
}

#[tokio::test]
async fn every_form_round_trips_at_every_level() {
    let catalog = Catalog::builtin().unwrap();
    for kind in SpellKind::ALL {
        for level in 1..=kind.max_level() {
            for form in catalog.filter(kind, level).unwrap() {
                for size in [SizeCategory::Small, SizeCategory::Large] {
                    let before = adventurer(size, 16);
                    let (store, app, id) = setup(before.clone());
                    let request = PolymorphRequest {
                        kind,
                        level,
                        form: form.name.clone(),
                        source: None,
                    };

                    let snapshot = app.use_cases.cast_polymorph.execute(&request).await.unwrap();
                    let during = load(&store, id).await;
                    assert_eq!(during.size, form.size);
                    assert_eq!(snapshot.category, EffectCategory::Polymorph);
                    assert!(!snapshot.items_created.is_empty());
                    assert_same_capacity(&before, &during);

                    app.use_cases.revert_selected().await.unwrap();
                    let after = load(&store, id).await;
                    assert_eq!(after.size, before.size, "{}", form.name);
                    assert_eq!(after.traits, before.traits, "{}", form.name);
                    assert_eq!(after.items, before.items, "{}", form.name);
                    assert_eq!(after.snapshot(), None);
                }
            }
        }
    }
}

#[tokio::test]
async fn second_transformation_is_rejected_without_changes() {
    let (store, app, id) = setup(adventurer(SizeCategory::Medium, 12));
    app.use_cases
        .cast_buff
        .execute(BuffKind::AnimalGrowth, 5)
        .await
        .unwrap();
    let transformed = load(&store, id).await;

    let err = app
        .use_cases
        .transform(&TransformationRequest::Polymorph(PolymorphRequest {
            kind: SpellKind::BeastShape,
            level: 2,
            form: "Wolf".into(),
            source: Some("Wild Shape".into()),
        }))
        .await
        .unwrap_err();

    assert!(matches!(err, TransformError::AlreadyTransformed { ref effect } if effect == "Animal Growth"));
    assert_eq!(load(&store, id).await, transformed);
}

#[tokio::test]
async fn revert_skips_items_the_user_deleted() {
    let (store, app, id) = setup(adventurer(SizeCategory::Medium, 12));
    let request = PolymorphRequest {
        kind: SpellKind::BeastShape,
        level: 3,
        form: "Bat".into(),
        source: Some("Wild Shape".into()),
    };
    let snapshot = app.use_cases.cast_polymorph.execute(&request).await.unwrap();
    assert_eq!(snapshot.armor.len(), 2);

    let shield = snapshot.armor[1].item_id;
    let bite = *snapshot.items_created.last().unwrap();
    store.delete_items(id, vec![shield, bite]).await.unwrap();

    app.use_cases.revert.execute(id).await.unwrap();
    let after = load(&store, id).await;
    assert_eq!(after.items.len(), 1);
    assert_eq!(
        after.items[0].equipment().map(|e| e.armor_value),
        Some(4)
    );
    assert_eq!(after.snapshot(), None);
}

#[tokio::test]
async fn recasting_a_buff_reuses_its_container() {
    let (store, app, id) = setup(adventurer(SizeCategory::Medium, 12));
    let cast_buff = &app.use_cases.cast_buff;

    cast_buff.execute(BuffKind::EnlargePerson, 1).await.unwrap();
    app.use_cases.revert_selected().await.unwrap();
    cast_buff.execute(BuffKind::EnlargePerson, 1).await.unwrap();

    let character = load(&store, id).await;
    let containers: Vec<_> = character
        .items
        .iter()
        .filter(|i| i.name == "Enlarge Person")
        .collect();
    assert_eq!(containers.len(), 1);
    assert_eq!(containers[0].buff().map(|b| b.active), Some(true));
    assert_eq!(character.size, SizeCategory::Large);
}

#[tokio::test]
async fn reverting_an_untransformed_character_changes_nothing() {
    let character = adventurer(SizeCategory::Medium, 12);
    let (store, app, id) = setup(character.clone());

    let err = app.use_cases.revert_selected().await.unwrap_err();
    assert!(matches!(err, TransformError::NotTransformed { .. }));
    assert_eq!(load(&store, id).await, character);
}

use charsheet::rules;
use charsheet::*;
use proptest::prelude::*;
use proptest::sample::select;

fn arb_abilities() -> impl Strategy<Value = AbilityBlock> {
    (prop::array::uniform6(1i32..=30), prop::option::of(1i32..=30)).prop_map(
        |([st, dx, cn, it, ws, ch], your_choice)| {
            let mut block = AbilityBlock::new(st, dx, cn, it, ws, ch);
            if let Some(score) = your_choice {
                block.set_raw(AbilityName::YourChoice, score);
            }
            block
        },
    )
}

fn arb_race() -> impl Strategy<Value = Race> {
    let increase = (select(AbilityName::options()), 1i32..=2)
        .prop_map(|(ability, amount)| AbilityIncrease::new(ability, amount));
    (
        select(RaceName::options()),
        select(SubraceName::options()),
        prop_oneof![Just(0), 20i32..=50],
        prop::collection::vec(increase, 0..3),
    )
        .prop_map(|(race, subrace, speed, increases)| {
            Race::new(race, subrace)
                .with_move_speed(speed)
                .with_ability_increases(increases)
        })
}

fn arb_background() -> impl Strategy<Value = Background> {
    prop_oneof![
        select(BackgroundName::options()).prop_map(Background::from),
        prop::collection::vec(select(SkillName::options()), 1..4)
            .prop_map(|skills| Background::custom("Wandering Scholar", skills).unwrap()),
    ]
}

fn arb_character() -> impl Strategy<Value = Character> {
    (
        arb_abilities(),
        select(ClassName::options()),
        arb_race(),
        1i32..=20,
        arb_background(),
    )
        .prop_map(|(abilities, class, race, level, background)| {
            Character::builder()
                .name("Generated")
                .abilities(abilities)
                .class(class)
                .race(race)
                .level(level)
                .background(background)
                .build()
                .unwrap()
        })
}

fn derived(character: &Character) -> Vec<i32> {
    let mut values = vec![
        character.proficiency_bonus(),
        character.max_hit_points(),
        character.armor_class(),
        character.initiative(),
        character.move_speed(),
    ];
    values.extend(AbilityName::CORE.iter().map(|a| character.saving_throw(*a)));
    values.extend(SkillName::options().into_iter().map(|s| character.skill_bonus(s)));
    values
}

proptest! {
    #[test]
    fn modifier_is_floored_half_distance_from_ten(score in 0i32..=30) {
        let expected = ((score - 10) as f64 / 2.0).floor() as i32;
        prop_assert_eq!(ability_modifier(score), expected);
    }

    #[test]
    fn proficiency_bonus_follows_tiers(level in 1i32..=20) {
        let expected = match level {
            1..=4 => 2,
            5..=8 => 3,
            9..=12 => 4,
            13..=16 => 5,
            _ => 6,
        };
        prop_assert_eq!(rules::proficiency_bonus(level), expected);
    }

    #[test]
    fn check_bonus_is_modifier_plus_optional_proficiency(character in arb_character()) {
        let pb = character.proficiency_bonus();
        for skill in SkillName::options() {
            let modifier = character.ability_modifier(skill.governing_ability());
            let trained = if character.is_proficient_in_skill(skill) { pb } else { 0 };
            prop_assert_eq!(character.skill_bonus(skill), modifier + trained);
        }
        for ability in AbilityName::CORE {
            let modifier = character.ability_modifier(ability);
            let trained = if character.is_proficient_in_save(ability) { pb } else { 0 };
            prop_assert_eq!(character.saving_throw(ability), modifier + trained);
        }
    }

    #[test]
    fn new_characters_start_at_full_health(character in arb_character()) {
        prop_assert_eq!(character.current_hit_points(), character.max_hit_points());
    }

    #[test]
    fn document_round_trip_preserves_derived_values(character in arb_character()) {
        let json = character.to_json().unwrap();
        let reparsed = Character::from_json(&json).unwrap();
        prop_assert_eq!(derived(&reparsed), derived(&character));
    }

    #[test]
    fn record_round_trip_preserves_character(character in arb_character()) {
        let record = CharacterRecord::from_character(&character, 1);
        let restored = record.to_character().unwrap();
        prop_assert_eq!(restored.effective_abilities(), character.effective_abilities());
        prop_assert_eq!(restored, character);
    }

    #[test]
    fn document_round_trip_preserves_character(character in arb_character()) {
        let reparsed = Character::from_json(&character.to_json().unwrap()).unwrap();
        prop_assert_eq!(reparsed, character);
    }

    #[test]
    fn resolved_sheet_agrees_with_getters(character in arb_character()) {
        let sheet = ResolvedSheet::resolve(&character).unwrap();
        prop_assert_eq!(sheet.proficiency_bonus().unwrap(), character.proficiency_bonus());
        prop_assert_eq!(sheet.max_hit_points().unwrap(), character.max_hit_points());
        prop_assert_eq!(sheet.armor_class().unwrap(), character.armor_class());
        prop_assert_eq!(sheet.initiative().unwrap(), character.initiative());
        prop_assert_eq!(sheet.move_speed().unwrap(), character.move_speed());
        for skill in SkillName::options() {
            prop_assert_eq!(sheet.skill(skill).unwrap(), character.skill_bonus(skill));
        }
        for value in &sheet.values {
            prop_assert!(value.is_consistent());
        }
    }
}

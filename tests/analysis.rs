// End-to-end chart analysis through the public API

use chrono::NaiveDate;
use rstest::rstest;
use saju_engine::{
    BirthInput, Branch, CycleEngine, Direction, LunarMonth, MonthTableConverter, NoLunarCalendar,
    Pillar, SajuAnalyzer, SajuError, Stem,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn lunar_table() -> MonthTableConverter {
    MonthTableConverter::from_months(vec![
        LunarMonth { year: 2024, month: 2, leap: false, start: date(2024, 3, 10), days: 30 },
        LunarMonth { year: 2024, month: 1, leap: false, start: date(2024, 2, 10), days: 29 },
    ])
}

#[test]
fn test_lunar_new_year_2024() {
    let analyzer = SajuAnalyzer::new(lunar_table());
    let input = BirthInput::lunar("2024-01-01", false, "ja", "male");
    let analysis = analyzer.analyze(&input, 2026, None).unwrap();

    assert_eq!(analysis.solar_date, date(2024, 2, 10));
    assert_eq!(analysis.chart.year, Pillar::new(Stem::Gap, Branch::Jin));
    assert_eq!(analysis.chart.month, Pillar::new(Stem::Byeong, Branch::In));
    assert_eq!(analysis.chart.day, Pillar::new(Stem::Gap, Branch::Jin));
    assert_eq!(analysis.chart.hour, Some(Pillar::new(Stem::Gap, Branch::Ja)));
    assert_eq!(analysis.ganji, "갑진 병인 갑진 갑자");
    assert_eq!(analysis.fortune.direction, Direction::Forward);
    assert_eq!(analysis.fortune.age, 3);
}

#[test]
fn test_solar_input_gets_lunar_display_date() {
    let analyzer = SajuAnalyzer::new(lunar_table());
    let input = BirthInput::solar("2024-03-09", "unknown", "female");
    let analysis = analyzer.analyze(&input, 2026, None).unwrap();

    let lunar = analysis.lunar_date.unwrap();
    assert_eq!((lunar.year, lunar.month, lunar.day), (2024, 1, 29));

    // outside the table the chart still succeeds, without a lunar date
    let input = BirthInput::solar("1990-05-15", "unknown", "female");
    let analysis = analyzer.analyze(&input, 2026, None).unwrap();
    assert_eq!(analysis.lunar_date, None);
}

#[test]
fn test_lunar_input_outside_table_is_conversion_error() {
    let analyzer = SajuAnalyzer::new(lunar_table());
    let input = BirthInput::lunar("2024-03-01", false, "ja", "male");
    let err = analyzer.analyze(&input, 2026, None).unwrap_err();
    assert!(err.is_conversion_error());

    // leap month 1 is not in the table
    let input = BirthInput::lunar("2024-01-01", true, "ja", "male");
    assert!(analyzer.analyze(&input, 2026, None).is_err());
}

#[rstest]
#[case("1949-10-01", Stem::Gap, Branch::Ja)]
#[case("1990-05-15", Stem::Gyeong, Branch::Jin)]
#[case("2000-01-01", Stem::Mu, Branch::O)]
#[case("2024-02-10", Stem::Gap, Branch::Jin)]
fn test_known_day_pillars(#[case] birth: &str, #[case] stem: Stem, #[case] branch: Branch) {
    let analyzer = SajuAnalyzer::new(NoLunarCalendar);
    let input = BirthInput::solar(birth, "unknown", "male");
    let analysis = analyzer.analyze(&input, 2026, None).unwrap();
    assert_eq!(analysis.chart.day, Pillar::new(stem, branch));
}

#[test]
fn test_before_spring_pivot_uses_previous_year() {
    let analyzer = SajuAnalyzer::new(NoLunarCalendar);
    let input = BirthInput::solar("1984-02-02", "unknown", "female");
    let analysis = analyzer.analyze(&input, 2026, None).unwrap();
    // 1983 = Gye-Hae
    assert_eq!(analysis.chart.year, Pillar::new(Stem::Gye, Branch::Hae));
    assert_eq!(analysis.chart.month.branch, Branch::Chuk);
}

#[test]
fn test_three_and_four_pillar_counts() {
    let analyzer = SajuAnalyzer::new(NoLunarCalendar);

    let three = analyzer
        .analyze(&BirthInput::solar("1990-05-15", "unknown", "male"), 2026, None)
        .unwrap();
    assert_eq!(three.elements.total, 6);
    assert_eq!(three.ten_gods.tally.positions.len(), 3);

    let four = analyzer
        .analyze(&BirthInput::solar("1990-05-15", "oh", "male"), 2026, None)
        .unwrap();
    assert_eq!(four.elements.total, 8);
    assert_eq!(four.ten_gods.tally.positions.len(), 4);

    // hidden stems of the extra branch add to the tally
    assert!(four.ten_gods.tally.total() > three.ten_gods.tally.total());
}

#[test]
fn test_cycle_count_and_current_cycle() {
    let analyzer =
        SajuAnalyzer::with_cycle_engine(NoLunarCalendar, CycleEngine::with_cycle_count(8));
    let input = BirthInput::solar("1990-05-15", "oh", "male");

    let analysis = analyzer.analyze(&input, 2026, Some(37)).unwrap();
    let cycles = &analysis.fortune.cycles;
    assert_eq!(cycles.len(), 8);
    for pair in cycles.windows(2) {
        assert_eq!(pair[1].start_age - pair[0].start_age, 10);
        assert_eq!(pair[1].pillar, pair[0].pillar.step(1));
    }
    let current = analysis.fortune.current.unwrap();
    assert!(current.contains(37));

    // an age below every range falls back to the first cycle
    let analysis = analyzer.analyze(&input, 2026, Some(0)).unwrap();
    assert_eq!(analysis.fortune.current, Some(analysis.fortune.cycles[0]));
}

#[test]
fn test_errors_are_classified() {
    let analyzer = SajuAnalyzer::new(NoLunarCalendar);

    let mut input = BirthInput::solar("15/05/1990", "oh", "male");
    let err = analyzer.analyze(&input, 2026, None).unwrap_err();
    assert!(err.is_input_error());

    input.birth_date = "1990-05-15".into();
    input.gender = Some(String::new());
    assert_eq!(analyzer.analyze(&input, 2026, None).unwrap_err(), SajuError::MissingGender);

    let input = BirthInput::lunar("2024-01-01", false, "ja", "male");
    assert!(analyzer.analyze(&input, 2026, None).unwrap_err().is_conversion_error());
}

#[test]
fn test_analysis_serializes_to_json() {
    let analyzer = SajuAnalyzer::new(NoLunarCalendar);
    let analysis = analyzer
        .analyze(&BirthInput::solar("1990-05-15", "oh", "male"), 2026, None)
        .unwrap();

    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["solar_date"], "1990-05-15");
    assert_eq!(json["time_slot"], "oh");
    assert_eq!(json["gender"], "male");
    assert_eq!(json["chart"]["day"]["display"], "경진");
    assert_eq!(json["ten_gods"]["tally"]["positions"][2]["role"], "self");
    assert_eq!(json["fortune"]["direction"], "forward");
    assert_eq!(json["fortune"]["year_fortune"]["year"], 2026);
    assert!(json["lunar_date"].is_null());
}

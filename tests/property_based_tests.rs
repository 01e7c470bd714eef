use diffcheck::config::ExitPolicy;
use diffcheck::diff::{DiffTag, diff_lines};
use diffcheck::lines::{read_lines, write_lines};
use diffcheck::{Lines, RunOptions, Runner};
use proptest::prelude::*;
use similar::Algorithm;
use tempfile::tempdir;

// Lines as they come back from a file: no newlines, no trailing whitespace
prop_compose! {
    fn arb_line()(line in "([a-z0-9_/:<>-]( ?[a-z0-9_/:<>-])*)?") -> String {
        line
    }
}

prop_compose! {
    fn arb_lines()(lines in prop::collection::vec(arb_line(), 0..40)) -> Lines {
        lines
    }
}

fn run_check(old: &[String], new: &[String], check: bool, policy: ExitPolicy) -> i32 {
    let dir = tempdir().unwrap();
    let input = dir.path().join("input.txt");
    write_lines(&input, old).unwrap();

    let options = RunOptions {
        inputfile: Some(input),
        check,
        exit_policy: policy,
        ..RunOptions::default()
    };
    let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
    let new = new.to_vec();
    let mut producer = move || -> diffcheck::Result<Lines> { Ok(new.clone()) };

    let mut runner = Runner::new(options, &mut out, &mut err);
    runner.run(&mut producer).unwrap().exit_code
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_write_read_round_trip(lines in arb_lines()) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("artifact.txt");

        write_lines(&path, &lines).unwrap();
        prop_assert_eq!(read_lines(&path).unwrap(), lines);
    }

    #[test]
    fn prop_identical_sequences_have_empty_diff(lines in arb_lines()) {
        prop_assert!(diff_lines(&lines, &lines, Algorithm::Myers).is_empty());
        prop_assert!(diff_lines(&lines, &lines, Algorithm::Patience).is_empty());
    }

    #[test]
    fn prop_appended_line_is_one_addition(lines in arb_lines(), extra in arb_line()) {
        let mut new = lines.clone();
        new.push(extra.clone());

        let diff = diff_lines(&lines, &new, Algorithm::Myers);
        prop_assert_eq!(diff.len(), 1);
        prop_assert_eq!(diff[0].tag, DiffTag::Added);
        prop_assert_eq!(&diff[0].text, &extra);
    }

    #[test]
    fn prop_removed_line_is_one_removal(
        lines in prop::collection::vec(arb_line(), 1..40),
        index in any::<prop::sample::Index>(),
    ) {
        let at = index.index(lines.len());
        let mut new = lines.clone();
        let removed = new.remove(at);

        let diff = diff_lines(&lines, &new, Algorithm::Myers);
        prop_assert_eq!(diff.len(), 1);
        prop_assert_eq!(diff[0].tag, DiffTag::Removed);
        prop_assert_eq!(&diff[0].text, &removed);
    }

    #[test]
    fn prop_check_off_never_fails(old in arb_lines(), new in arb_lines()) {
        prop_assert_eq!(run_check(&old, &new, false, ExitPolicy::Count), 0);
        prop_assert_eq!(run_check(&old, &new, false, ExitPolicy::Fixed), 0);
    }

    #[test]
    fn prop_check_on_reports_differences(old in arb_lines(), new in arb_lines()) {
        let differences = diff_lines(&old, &new, Algorithm::Myers).len();

        let count = run_check(&old, &new, true, ExitPolicy::Count);
        let fixed = run_check(&old, &new, true, ExitPolicy::Fixed);

        if differences == 0 {
            prop_assert_eq!(count, 0);
            prop_assert_eq!(fixed, 0);
        } else {
            prop_assert_eq!(count as usize, differences.min(255));
            prop_assert_eq!(fixed, 1);
        }
    }
}

use calcwalk::syntax::{Topic, TermResult};
use calcwalk::{parse_terms, rules, solve, SolverError};

fn result_strings(expression: &str, topic: Topic) -> Vec<String> {
  solve(expression, topic, None)
    .unwrap()
    .terms
    .iter()
    .map(|solved| solved.result.display().to_string())
    .collect()
}

mod differentiation {
  use super::*;

  #[test]
  fn power_rule() {
    assert_eq!(
      result_strings("x^3", Topic::Differentiation),
      vec!["3x^2"]
    );
  }

  #[test]
  fn constant_vanishes() {
    assert_eq!(result_strings("5", Topic::Differentiation), vec!["0"]);
  }

  #[test]
  fn linear_term_keeps_its_coefficient() {
    assert_eq!(result_strings("7x", Topic::Differentiation), vec!["7"]);
  }

  #[test]
  fn unit_result_keeps_its_numeral_at_power_zero() {
    // x -> 1: a power-0 result must show the bare numeral even though a
    // coefficient of 1 would be omitted in front of a variable part.
    assert_eq!(result_strings("x", Topic::Differentiation), vec!["1"]);
    assert_eq!(
      result_strings("x^2 + x", Topic::Differentiation),
      vec!["2x", "1"]
    );
  }

  #[test]
  fn negative_coefficients_carry_their_sign() {
    assert_eq!(
      result_strings("-x^2", Topic::Differentiation),
      vec!["-2x"]
    );
    assert_eq!(
      result_strings("-x^3", Topic::Differentiation),
      vec!["-3x^2"]
    );
  }

  #[test]
  fn derivative_result_invariants() {
    let solution = solve("4x^3", Topic::Differentiation, None).unwrap();
    match &solution.terms[0].result {
      TermResult::Derivative {
        coeff,
        power,
        display,
      } => {
        assert_eq!(*coeff, 12);
        assert_eq!(*power, 2);
        assert_eq!(display, "12x^2");
      }
      other => panic!("expected a derivative result, got {other:?}"),
    }
  }

  #[test]
  fn differentiation_is_termwise_linear() {
    // No cross-term interaction: each term's result equals the result of
    // solving that term alone.
    let whole = solve("3x^2 + 5x^3 - 2x", Topic::Differentiation, None)
      .unwrap();
    for solved in &whole.terms {
      let alone =
        solve(&solved.term.original, Topic::Differentiation, None).unwrap();
      assert_eq!(alone.terms[0].result, solved.result);
    }
  }
}

mod integration {
  use super::*;

  #[test]
  fn whole_number_quotient() {
    assert_eq!(result_strings("4x", Topic::Integration), vec!["2x^2"]);
  }

  #[test]
  fn unit_quotient_is_omitted() {
    assert_eq!(result_strings("3x^2", Topic::Integration), vec!["x^3"]);
  }

  #[test]
  fn non_whole_quotient_stays_a_fraction() {
    assert_eq!(
      result_strings("x^2", Topic::Integration),
      vec!["(1/3)x^3"]
    );
  }

  #[test]
  fn constant_integrates_to_a_linear_term() {
    assert_eq!(result_strings("5", Topic::Integration), vec!["5x"]);
  }

  #[test]
  fn integral_result_invariants() {
    let solution = solve("x^2", Topic::Integration, None).unwrap();
    match &solution.terms[0].result {
      TermResult::Integral {
        numerator,
        denominator,
        power,
        ..
      } => {
        assert_eq!(*numerator, 1);
        assert_eq!(*denominator, 3);
        assert_eq!(*power, 3);
      }
      other => panic!("expected an integral result, got {other:?}"),
    }
  }

  #[test]
  fn integrating_a_derivative_restores_the_power_term() {
    // integrate(differentiate(x^n)) == x^n for n >= 2, up to the
    // additive constant.
    for n in 2..=5 {
      let source = format!("x^{n}");
      let derivative = result_strings(&source, Topic::Differentiation);
      let restored = result_strings(&derivative[0], Topic::Integration);
      assert_eq!(restored, vec![source.clone()], "n = {n}");
    }
  }
}

mod combining {
  use super::*;

  #[test]
  fn joins_with_signs() {
    let solution =
      solve("2x^2 + 3x - 5", Topic::Differentiation, None).unwrap();
    assert_eq!(rules::combine(&solution.terms, false), "4x + 3");
  }

  #[test]
  fn negative_results_join_with_minus() {
    let solution =
      solve("2x^2 - 3x", Topic::Differentiation, None).unwrap();
    assert_eq!(rules::combine(&solution.terms, false), "4x - 3");
  }

  #[test]
  fn all_zero_collapses_to_zero() {
    let solution = solve("5", Topic::Differentiation, None).unwrap();
    assert_eq!(rules::combine(&solution.terms, false), "0");
  }

  #[test]
  fn empty_term_list_combines_to_zero() {
    assert_eq!(rules::combine(&[], false), "0");
    assert_eq!(rules::combine(&[], true), "0");
  }

  #[test]
  fn indefinite_integral_appends_the_constant() {
    let solution = solve("4x", Topic::Integration, None).unwrap();
    assert_eq!(rules::combine(&solution.terms, true), "2x^2 + C");
  }
}

mod definite_limits {
  use super::*;

  #[test]
  fn evaluates_the_antiderivative_difference() {
    // Antiderivative of 3x^2 is x^3; F(2) - F(0) = 8.
    let terms = parse_terms("3x^2").unwrap();
    let eval = rules::evaluate_definite(&terms, 0.0, 2.0).unwrap();
    assert_eq!(eval.at_upper, 8.0);
    assert_eq!(eval.at_lower, 0.0);
    assert_eq!(eval.area, 8.0);
  }

  #[test]
  fn negative_lower_bound() {
    // F(x) = x^2 for 2x; F(2) - F(-1) = 4 - 1 = 3.
    let terms = parse_terms("2x").unwrap();
    let eval = rules::evaluate_definite(&terms, -1.0, 2.0).unwrap();
    assert_eq!(eval.area, 3.0);
  }

  #[test]
  fn non_finite_values_fail_closed() {
    let terms = parse_terms("x^2").unwrap();
    let err =
      rules::evaluate_definite(&terms, 0.0, f64::INFINITY).unwrap_err();
    assert!(matches!(err, SolverError::DegenerateLimits(_, _)));
  }
}

mod display_formatting {
  use calcwalk::syntax::format_real;

  #[test]
  fn integral_values_print_without_decimals() {
    assert_eq!(format_real(8.0), "8");
    assert_eq!(format_real(-3.0), "-3");
  }

  #[test]
  fn fractional_values_round_to_two_decimals() {
    assert_eq!(format_real(16.0 / 3.0), "5.33");
    assert_eq!(format_real(2.5), "2.5");
    assert_eq!(format_real(0.125), "0.13");
  }
}

mod numerical_reasoning {
  use super::*;

  #[test]
  fn percentage_question() {
    let solution =
      solve("What is 20 percent of 50?", Topic::NumericalReasoning, None)
        .unwrap();
    assert_eq!(solution.topic, Topic::NumericalReasoning);
    assert!(solution.terms.is_empty());
    assert_eq!(solution.steps.len(), 6);
    assert_eq!(solution.steps[0].visual, "Find 20% of 50");
    assert_eq!(solution.steps.last().unwrap().visual, "Answer: 10");
  }

  #[test]
  fn unitary_cost_question() {
    let solution = solve(
      "If 1 pen costs 10, how much do 4 pens cost?",
      Topic::NumericalReasoning,
      None,
    )
    .unwrap();
    assert_eq!(solution.steps.last().unwrap().visual, "Total: 40");
  }

  #[test]
  fn distance_question() {
    let solution = solve(
      "A car goes 50 km in 1 hour. How far in 3 hours?",
      Topic::NumericalReasoning,
      None,
    )
    .unwrap();
    assert_eq!(solution.steps.last().unwrap().visual, "150 km");
  }

  #[test]
  fn clock_difference_question() {
    let solution = solve(
      "How many minutes from 2:30 to 3:15?",
      Topic::NumericalReasoning,
      None,
    )
    .unwrap();
    assert_eq!(solution.steps.last().unwrap().visual, "45 minutes");
  }

  #[test]
  fn clock_difference_wraps_past_noon() {
    let solution = solve(
      "How many minutes from 11:50 to 1:10?",
      Topic::NumericalReasoning,
      None,
    )
    .unwrap();
    assert_eq!(solution.steps.last().unwrap().visual, "80 minutes");
  }

  #[test]
  fn spelled_out_numbers_are_normalized() {
    let solution = solve(
      "What is twenty percent of fifty?",
      Topic::NumericalReasoning,
      None,
    )
    .unwrap();
    assert_eq!(solution.steps.last().unwrap().visual, "Answer: 10");
  }

  #[test]
  fn basic_arithmetic_question() {
    let solution =
      solve("What is 12 + 7?", Topic::NumericalReasoning, None).unwrap();
    assert_eq!(solution.steps.last().unwrap().visual, "Answer: 19");
  }

  #[test]
  fn unknown_question_returns_guidance() {
    let err = solve("Tell me a story", Topic::NumericalReasoning, None)
      .unwrap_err();
    assert!(matches!(err, SolverError::UnsupportedQuestion(_)));
  }
}

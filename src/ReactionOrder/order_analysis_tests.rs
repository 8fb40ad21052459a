/////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use crate::ReactionOrder::linearization::{KineticOrder, linearize_all};
    use crate::ReactionOrder::order_analysis::{analyze, analyze_file, analyze_with_settings};
    use crate::ReactionOrder::order_errors::KineticsError;
    use crate::ReactionOrder::dataset_loader::ValidatedSeries;
    use crate::ReactionOrder::regression::fit_target;
    use crate::settings::AnalysisSettings;
    use approx::assert_relative_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_from(t: &[f64], a: &[f64]) -> String {
        let mut text = String::from("time,absorbance\n");
        for (ti, ai) in t.iter().zip(a.iter()) {
            text.push_str(&format!("{},{}\n", ti, ai));
        }
        text
    }

    #[test]
    fn test_perfect_zero_order_decay() {
        let data = "t,A\n0,1.0\n1,0.8\n2,0.6\n3,0.4\n4,0.2\n";
        let result = analyze(data.as_bytes()).unwrap();
        let zero = result.candidate(KineticOrder::Zero).unwrap();
        assert_relative_eq!(zero.r_squared, 1.0, epsilon = 1e-12);
        assert_relative_eq!(zero.rate_constant, 0.2, epsilon = 1e-12);
        assert_eq!(result.best_order.order, KineticOrder::Zero);
        assert_eq!(result.best_order.order_label, "Order 0");
        assert_eq!(result.best_order.equation, "A = -0.2000·t + 1.0000");
        assert!(result.interpretation.contains("independent"));
        result.pretty_print();
    }

    #[test]
    fn test_perfect_first_order_decay() {
        let data = "t;A\n0;1.0\n1;0.3679\n2;0.1353\n3;0.0498\n4;0.0183\n";
        let result = analyze(data.as_bytes()).unwrap();
        let first = result.candidate(KineticOrder::First).unwrap();
        assert_relative_eq!(first.r_squared, 1.0, epsilon = 1e-5);
        assert_relative_eq!(first.rate_constant, 1.0, epsilon = 1e-3);
        assert_eq!(result.best_order.order, KineticOrder::First);
        assert!(result.candidate(KineticOrder::Zero).unwrap().r_squared < first.r_squared);
        assert!(result.candidate(KineticOrder::Second).unwrap().r_squared < first.r_squared);
        assert!(result.interpretation.contains("proportional"));
    }

    #[test]
    fn test_perfect_second_order_decay() {
        let k = 0.5;
        let t: Vec<f64> = (0..6).map(|i| i as f64 * 2.0).collect();
        let a: Vec<f64> = t.iter().map(|ti| 0.9 / (1.0 + 0.9 * k * ti)).collect();
        let result = analyze(csv_from(&t, &a).as_bytes()).unwrap();
        assert_eq!(result.best_order.order, KineticOrder::Second);
        assert_relative_eq!(result.best_order.rate_constant, k, epsilon = 1e-9);
        assert_relative_eq!(result.best_order.r_squared, 1.0, epsilon = 1e-12);
        assert!(result.best_order.equation.starts_with("1/A = 0.5000·t + 1.1111"));
    }

    #[test]
    fn test_non_positive_absorbance() {
        let zero = analyze(b"t,A\n0,1.0\n1,0.0\n2,0.5\n");
        assert!(matches!(zero, Err(KineticsError::Domain { .. })));
        let negative = analyze(b"t,A\n0,1.0\n1,0.5\n2,-0.1\n");
        match negative {
            Err(e) => {
                assert_eq!(e.kind(), "DomainError");
                assert!(!e.guidance().is_empty());
            }
            Ok(_) => panic!("negative absorbance must be rejected"),
        }
    }

    #[test]
    fn test_single_column_file() {
        let result = analyze(b"absorbance\n1.0\n0.8\n0.6\n");
        assert!(matches!(result, Err(KineticsError::Format(_))));
    }

    #[test]
    fn test_empty_and_one_row_files() {
        assert!(matches!(analyze(b""), Err(KineticsError::Format(_))));
        assert!(matches!(
            analyze(b"t,A\n0,1.0\n"),
            Err(KineticsError::Format(_))
        ));
    }

    #[test]
    fn test_constant_time_column() {
        let data = "t,A\n5,1.0\n5,0.8\n5,0.6\n";
        let result = analyze(data.as_bytes());
        assert!(matches!(result, Err(KineticsError::DegenerateFit { .. })));
        // every one of the three sub-fits is degenerate
        let series = ValidatedSeries {
            t: vec![5.0, 5.0, 5.0],
            A: vec![1.0, 0.8, 0.6],
        };
        for target in linearize_all(&series) {
            match fit_target(&series.t, &target) {
                Err(KineticsError::DegenerateFit { order }) => {
                    assert_eq!(order, target.order.label())
                }
                other => panic!("unexpected result: {:?}", other),
            }
        }
    }

    #[test]
    fn test_two_points_give_perfect_fits_and_lowest_order_wins() {
        let result = analyze(b"t,A\n0,1.0\n2,0.5\n").unwrap();
        for c in &result.candidates {
            assert_eq!(c.r_squared, 1.0);
        }
        assert_eq!(result.best_order.order, KineticOrder::Zero);
    }

    #[test]
    fn test_properties_on_various_datasets() {
        // clock offsets up to epoch seconds
        let time_bases = [0.0, 1e7, 1.7e9];
        for case in 0..24 {
            let n = 3 + case % 7;
            let base = time_bases[case % time_bases.len()];
            let t: Vec<f64> = (0..n)
                .map(|i| base + i as f64 * (1.0 + case as f64 * 0.3))
                .collect();
            let mut a: Vec<f64> = t
                .iter()
                .enumerate()
                .map(|(i, ti)| {
                    let noise = 0.02 * ((i * 7 + case * 13) as f64).sin();
                    (1.5 * (-0.05 * (case as f64 + 1.0) * (ti - base)).exp() + noise).max(1e-3)
                })
                .collect();
            // extreme absorbances at the end of some runs
            match case % 4 {
                1 => a[n - 1] = 1e-320,
                3 => a[n - 1] = 1e150,
                _ => {}
            }
            let bytes = csv_from(&t, &a);
            let result = analyze(bytes.as_bytes()).unwrap();
            assert_eq!(result.candidates.len(), 3);
            for c in &result.candidates {
                assert!(c.r_squared >= 0.0 && c.r_squared <= 1.0);
                assert!(c.rate_constant >= 0.0 && c.rate_constant.is_finite());
            }
            // best order has the maximum R²
            let max_r2 = result
                .candidates
                .iter()
                .map(|c| c.r_squared)
                .fold(f64::MIN, f64::max);
            assert_eq!(result.best_order.r_squared, max_r2);
            // the same bytes give the same result
            let again = analyze(bytes.as_bytes()).unwrap();
            assert_eq!(result, again);
        }
    }

    #[test]
    fn test_epoch_time_stamps() {
        let data = "t,A
1700000000,1.0
1700000060,0.8
1700000120,0.6
1700000180,0.4
1700000240,0.2
";
        let result = analyze(data.as_bytes()).unwrap();
        assert_eq!(result.best_order.order, KineticOrder::Zero);
        assert_relative_eq!(result.best_order.r_squared, 1.0, epsilon = 1e-9);
        assert_relative_eq!(result.best_order.rate_constant, 0.2 / 60.0, epsilon = 1e-12);

        let t: Vec<f64> = (0..5).map(|i| 1e7 + i as f64).collect();
        let a: Vec<f64> = (0..5).map(|i| (-0.3 * i as f64).exp()).collect();
        let result = analyze(csv_from(&t, &a).as_bytes()).unwrap();
        assert_eq!(result.best_order.order, KineticOrder::First);
        assert_relative_eq!(result.best_order.rate_constant, 0.3, epsilon = 1e-9);
    }

    #[test]
    fn test_reciprocal_overflow_gives_defined_second_order() {
        let result = analyze(b"t,A\n0,1.0\n1,0.5\n2,1e-320\n").unwrap();
        let second = result.candidate(KineticOrder::Second).unwrap();
        assert!(second.fit.overflow);
        assert_eq!(second.r_squared, 0.0);
        assert!(second.rate_constant.is_finite());
        // line through the two finite points 1/A = 1, 2
        assert_relative_eq!(second.rate_constant, 1.0, epsilon = 1e-12);
        assert_ne!(result.best_order.order, KineticOrder::Second);
        assert!(!result.candidate(KineticOrder::First).unwrap().fit.overflow);
        assert!(result.to_json().unwrap().contains("\"overflow\": true"));
    }

    #[test]
    fn test_quoted_csv_file() {
        let data = "\"time, min\",\"absorbance\"\n\"0\",\"1.0\"\n\"1\",\"0.8\"\n\"2\",\"0.6\"\n\"3\",\"0.4\"\n";
        let result = analyze(data.as_bytes()).unwrap();
        assert_eq!(result.best_order.order, KineticOrder::Zero);
        assert_relative_eq!(result.best_order.rate_constant, 0.2, epsilon = 1e-12);

        // quoted decimal commas in a comma separated file, CRLF endings
        let data = "t,A\r\n0,\"1,00\"\r\n1,\"0,50\"\r\n2,\"0,25\"\r\n3,\"0,125\"\r\n";
        let result = analyze(data.as_bytes()).unwrap();
        assert_eq!(result.best_order.order, KineticOrder::First);
        assert_relative_eq!(result.best_order.rate_constant, 2f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_unsorted_time_tolerated_unless_required() {
        let data = b"t,A\n0,1.0\n2,0.6\n1,0.8\n3,0.4\n";
        let result = analyze(data).unwrap();
        assert_eq!(result.best_order.order, KineticOrder::Zero);
        let mut settings = AnalysisSettings::default();
        settings.require_monotonic_time = true;
        assert!(matches!(
            analyze_with_settings(data, &settings),
            Err(KineticsError::Domain { .. })
        ));
    }

    #[test]
    fn test_precision_setting() {
        let mut settings = AnalysisSettings::default();
        settings.precision = 2;
        let result = analyze_with_settings(b"t\tA\n0\t1.0\n1\t0.8\n2\t0.6\n", &settings).unwrap();
        assert_eq!(result.best_order.equation, "A = -0.20·t + 1.00");
    }

    #[test]
    fn test_plot_series_in_result() {
        let result = analyze(b"t,A\n0,1.0\n1,0.8\n2,0.6\n3,0.4\n").unwrap();
        assert_eq!(result.plot_series.len(), 3);
        let first = &result.plot_series[1];
        assert_eq!(first.order, KineticOrder::First);
        assert_eq!(first.y_label, "ln A");
        let points = first.points();
        assert_eq!(points.len(), 4);
        assert_relative_eq!(points[1].1, 0.8f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn test_analyze_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "time (min);absorbance").unwrap();
        writeln!(temp_file, "0;0,820").unwrap();
        writeln!(temp_file, "10;0,615").unwrap();
        writeln!(temp_file, "20;0,461").unwrap();
        writeln!(temp_file, "30;0,346").unwrap();
        let file_path = temp_file.path().to_str().unwrap();
        let result = analyze_file(file_path, &AnalysisSettings::default()).unwrap();
        assert_eq!(result.best_order.order, KineticOrder::First);

        let missing = analyze_file("no_such_kinetics_file.csv", &AnalysisSettings::default());
        assert!(matches!(missing, Err(KineticsError::Io(_))));
    }
}

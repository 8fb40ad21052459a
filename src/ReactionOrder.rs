/// eng
/// Determination of the kinetic order of a reaction from time-absorbance measurements.
/// The data go strictly downstream through the following stages:
/// 1) dataset_loader: delimited text -> RawDataset -> ValidatedSeries (t, A)
/// 2) linearization: A vs t, ln A vs t, 1/A vs t
/// 3) regression: ordinary least squares line for every transformed target
/// 4) order_selector: rate constants k = |slope|, ranking by R², lowest order wins ties
/// 5) interpretation: fixed text for the selected order and the final AnalysisResult
/// No stage keeps any state between runs, so every analysis is a pure function of the input bytes.
/// ----------------------------------------------------------------
/// # Examples
/// ```
/// use KiOrder::ReactionOrder::order_analysis::analyze;
/// let data = "t,A\n0,1.0\n1,0.8\n2,0.6\n3,0.4\n4,0.2\n";
/// let result = analyze(data.as_bytes()).unwrap();
/// assert_eq!(result.best_order.order_label, "Order 0");
/// result.pretty_print();
/// ```
pub mod order_analysis;
/// errors of all the pipeline stages
pub mod order_errors;
/// Parsing of uploaded delimited text into the time and absorbance vectors.
/// The delimiter (comma, semicolon, tab or whitespace) is sniffed from the first lines,
/// the header row is recognized by its non-numeric cells.
///  # Examples
/// ```
/// use KiOrder::ReactionOrder::dataset_loader::RawDataset;
/// let raw = RawDataset::parse("time;abs\n0;0.9\n5;0.7\n").unwrap();
/// assert_eq!(raw.rows.len(), 2);
/// let series = raw.validate().unwrap();
/// assert_eq!(series.t, vec![0.0, 5.0]);
/// ```
pub mod dataset_loader;
/// the three linearizing transforms: identity, natural logarithm, reciprocal
pub mod linearization;
/// closed form least squares fit of a straight line
pub mod regression;
/// rate constants, equations and the choice of the best order
pub mod order_selector;
/// natural-language interpretation and the final result of the analysis
pub mod interpretation;

mod order_analysis_tests;

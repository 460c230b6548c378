#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, &str)| {
    // Segments must partition the text for any input, including case
    // mappings that change byte length
    let (text, query) = input;
    let segments = spravka::matcher::highlight(text, query);
    let rebuilt: String = segments.iter().map(|s| s.text).collect();
    assert_eq!(rebuilt, text);

    let _ = spravka::matcher::contains_ignore_case(text, query);
});

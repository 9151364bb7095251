#![no_main]

use chrono::NaiveTime;
use libfuzzer_sys::fuzz_target;
use pd_shift::{IncludeCondition, NonWorkingDay};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let handoff_times: Vec<NaiveTime> = [(6, 0), (10, 0), (18, 0)]
            .iter()
            .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
            .collect();

        // Neither parser may panic, whatever the input
        let _ = IncludeCondition::from_expr(input, &handoff_times);
        let _ = NonWorkingDay::from_token(input);
    }
});

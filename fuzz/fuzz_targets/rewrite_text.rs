#![no_main]

use assetfix_domain::{ApiBaseProfile, CatalogId, RewritePlan, rewrite_asset};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary text through every catalog and the fallback: no panics,
    // `changed` agrees with the output, and a second pass changes nothing.
    let Ok(s) = std::str::from_utf8(data) else { return };
    let Ok(plan) = RewritePlan::for_catalogs(&CatalogId::ALL, &ApiBaseProfile::default()) else {
        return;
    };

    for name in ["app.js", "visit-report.js", "site.css"] {
        let out = rewrite_asset(name, s, plan.sets_for(name), &plan.fallbacks);
        assert_eq!(out.changed, out.text != s);
        let again = rewrite_asset(name, &out.text, plan.sets_for(name), &plan.fallbacks);
        assert!(!again.changed, "not a fixed point for {name}: {s:?}");
    }
});

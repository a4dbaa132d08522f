#![no_main]

use libfuzzer_sys::fuzz_target;
use snapshade_spec::hash::canonical_recipe_hash;
use snapshade_spec::validation::validate_recipe;
use snapshade_spec::FilterRecipe;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    // Parsing, validation and hashing must never panic
    if let Ok(recipe) = FilterRecipe::from_json(text) {
        let _ = validate_recipe(&recipe);
        let _ = canonical_recipe_hash(&recipe);
    }
});

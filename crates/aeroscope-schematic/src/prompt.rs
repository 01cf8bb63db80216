//! Prompt template for schematic generation.

/// Build the image prompt for `part` on an aircraft powered by `propulsion`.
pub fn schematic_prompt(part: &str, propulsion: &str) -> String {
    format!(
        "Generate a highly detailed, technical blueprint schematic of a {part} for a \
         {propulsion} powered aircraft.\n\
         Visual Style: \"Industrial Sci-Fi\", blueprint style.\n\
         Background: Dark charcoal or black.\n\
         Lines: Glowing cyan (#00f3ff) and safety orange (#ff4d00) accents.\n\
         Content: Exploded view showing internal components like cryogenic pumps, \
         combustion chambers, or fuel cells.\n\
         Text: Include small technical annotations in a monospace font.\n\
         High contrast, precise lines."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_inputs() {
        let prompt = schematic_prompt("ENG 1", "Liquid Hydrogen (LH2)");
        assert!(prompt.contains("schematic of a ENG 1 for a Liquid Hydrogen (LH2) powered aircraft"));
        assert!(prompt.contains("#00f3ff"));
        assert!(prompt.contains("#ff4d00"));
    }
}

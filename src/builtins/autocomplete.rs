//! Helpers around autocomplete handlers and their suggestions

use crate::serenity_prelude as serenity;

/// Discord shows at most this many autocomplete suggestions
const MAX_AUTOCOMPLETE_CHOICES: usize = 25;

/// Fills autocomplete suggestions into the response builder.
///
/// Suggestions beyond the 25 Discord accepts are dropped.
///
/// ```rust,no_run
/// # use interaction_commands::serenity_prelude as serenity;
/// # async fn foo(
/// #     ctx: interaction_commands::AutocompleteContext<'_, ()>,
/// #     command: &interaction_commands::CommandDefinition<(), String>,
/// #     subcommands: &std::collections::HashMap<
/// #         String,
/// #         Vec<interaction_commands::Subcommand<(), String>>,
/// #     >,
/// # ) -> Result<(), serenity::Error> {
/// if let Ok(Some(choices)) = command.autocomplete(subcommands, ctx).await {
///     ctx.interaction
///         .create_autocomplete_response(ctx.discord, |response| {
///             interaction_commands::builtins::autocomplete_response(response, &choices)
///         })
///         .await?;
/// }
/// # Ok(()) }
/// ```
pub fn autocomplete_response<'a>(
    response: &'a mut serenity::CreateAutocompleteResponse,
    choices: &[crate::AutocompleteChoice],
) -> &'a mut serenity::CreateAutocompleteResponse {
    if choices.len() > MAX_AUTOCOMPLETE_CHOICES {
        log::warn!(
            "dropping {} autocomplete choices over Discord's limit of {}",
            choices.len() - MAX_AUTOCOMPLETE_CHOICES,
            MAX_AUTOCOMPLETE_CHOICES
        );
    }

    let choices = choices
        .iter()
        .take(MAX_AUTOCOMPLETE_CHOICES)
        .map(crate::AutocompleteChoice::to_json)
        .collect();
    response.0.insert("choices", serde_json::Value::Array(choices));
    response
}

/// Logs when autocomplete handler and autocomplete-enabled options don't go together.
///
/// Discord sends autocomplete interactions only for options marked `autocomplete`, so a handler
/// without such options is never called, and such options without a handler never get
/// suggestions.
pub(crate) fn warn_on_autocomplete_mismatch(
    command_name: &str,
    options: &[crate::CommandOption],
    has_handler: bool,
) {
    let autocompleted = options.iter().filter(|option| option.autocomplete).count();
    if has_handler && autocompleted == 0 {
        log::warn!(
            "`{}` has an autocomplete handler but no option with autocomplete enabled",
            command_name
        );
    }
    if !has_handler && autocompleted > 0 {
        log::warn!(
            "`{}` has {} autocomplete option(s) but no autocomplete handler",
            command_name,
            autocompleted
        );
    }
}

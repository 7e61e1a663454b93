//! Small bot wiring the command definitions into a serenity event handler.
//!
//! Run with `DISCORD_TOKEN=... cargo run --example=localized_bot` from the repository root.

use std::collections::HashMap;

use interaction_commands::{
    builtins, localized_prop, serenity_prelude as serenity, ApplicationContext,
    AutocompleteChoice, AutocompleteContext, BoxFuture, Command, CommandDefinition,
    CommandMetadata, CommandOption, CommandWithSubcommands, FluentTranslator, LocaleSet,
    OptionType, Subcommand, TranslatorOptions,
};

type Error = Box<dyn std::error::Error + Send + Sync>;

pub struct Data {
    fruits: Vec<&'static str>,
}

async fn respond(ctx: ApplicationContext<'_, Data>, content: String) -> Result<(), Error> {
    ctx.interaction
        .create_interaction_response(ctx.discord, |r| {
            r.kind(serenity::InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|d| d.content(&content))
        })
        .await?;
    Ok(())
}

fn ping(ctx: ApplicationContext<'_, Data>) -> BoxFuture<'_, Result<(), Error>> {
    Box::pin(async move { respond(ctx, "Pong!".into()).await })
}

fn fruit(ctx: ApplicationContext<'_, Data>) -> BoxFuture<'_, Result<(), Error>> {
    Box::pin(async move {
        let values = ctx.option_values();
        let name = values
            .get("name")
            .and_then(|value| value.as_str())
            .unwrap_or("nothing");
        let response = match ctx.data.fruits.iter().find(|fruit| **fruit == name) {
            Some(fruit) => format!("Yes, {} is a fruit", fruit),
            None => format!("Never heard of {}", name),
        };
        respond(ctx, response).await
    })
}

fn suggest_fruits(
    ctx: AutocompleteContext<'_, Data>,
) -> BoxFuture<'_, Result<Vec<AutocompleteChoice>, Error>> {
    Box::pin(async move {
        let partial = ctx.partial_input().unwrap_or("");
        Ok(ctx
            .data
            .fruits
            .iter()
            .filter(|fruit| fruit.starts_with(partial))
            .map(|fruit| AutocompleteChoice::new(*fruit, *fruit))
            .collect())
    })
}

fn show_settings(ctx: ApplicationContext<'_, Data>) -> BoxFuture<'_, Result<(), Error>> {
    Box::pin(async move {
        let response = format!("Your locale is {}", ctx.locale());
        respond(ctx, response).await
    })
}

fn avatar(
    ctx: ApplicationContext<'_, Data>,
    user: serenity::User,
) -> BoxFuture<'_, Result<(), Error>> {
    Box::pin(async move { respond(ctx, user.face()).await })
}

fn quote(
    ctx: ApplicationContext<'_, Data>,
    message: serenity::Message,
) -> BoxFuture<'_, Result<(), Error>> {
    Box::pin(async move { respond(ctx, format!("> {}", message.content)).await })
}

struct Handler {
    commands: Vec<CommandDefinition<Data, Error>>,
    subcommands: HashMap<String, Vec<Subcommand<Data, Error>>>,
    data: Data,
}

impl Handler {
    fn command(&self, name: &str) -> Option<&CommandDefinition<Data, Error>> {
        self.commands.iter().find(|command| command.name() == name)
    }
}

#[serenity::async_trait]
impl serenity::EventHandler for Handler {
    async fn ready(&self, ctx: serenity::Context, ready: serenity::Ready) {
        log::info!("{} is connected", ready.user.name);

        let builders = builtins::create_application_commands(&self.commands, &self.subcommands);
        let result = serenity::model::application::command::Command::set_global_application_commands(
            &ctx.http,
            |b| b.set_application_commands(builders),
        )
        .await;
        if let Err(e) = result {
            log::error!("failed to register commands: {}", e);
        }
    }

    async fn interaction_create(&self, ctx: serenity::Context, interaction: serenity::Interaction) {
        match interaction {
            serenity::Interaction::ApplicationCommand(interaction) => {
                let app_ctx = ApplicationContext::new(&ctx, &interaction, &self.data);
                let result = match self.command(&interaction.data.name) {
                    Some(command) => command.invoke(&self.subcommands, app_ctx).await,
                    None => {
                        log::warn!("unknown command `{}`", interaction.data.name);
                        return;
                    }
                };
                if let Err(e) = result {
                    log::error!("`{}` failed: {}", interaction.data.name, e);
                }
            }
            serenity::Interaction::Autocomplete(interaction) => {
                let autocomplete_ctx = AutocompleteContext::new(&ctx, &interaction, &self.data);
                let choices = match self.command(&interaction.data.name) {
                    Some(command) => {
                        command
                            .autocomplete(&self.subcommands, autocomplete_ctx)
                            .await
                    }
                    None => return,
                };
                match choices {
                    Ok(Some(choices)) => {
                        let result = interaction
                            .create_autocomplete_response(&ctx.http, |response| {
                                builtins::autocomplete_response(response, &choices)
                            })
                            .await;
                        if let Err(e) = result {
                            log::warn!("couldn't send autocomplete response: {}", e);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => log::warn!("couldn't generate autocomplete response: {}", e),
                }
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let translator = FluentTranslator::load(TranslatorOptions {
        directory: "demos/localized_bot/translations".into(),
        locale_set: LocaleSet::Discord,
        ..Default::default()
    })?;

    let fruit_name = CommandOption::localized(
        &translator,
        OptionType::String,
        "fruit-name",
        "fruit-name.description",
    )?
    .required()
    .autocomplete();
    let commands: Vec<CommandDefinition<Data, Error>> = vec![
        Command::chat_input(
            CommandMetadata::localized(&translator, "ping", "ping.description")?,
            Vec::new(),
            ping,
        )
        .into(),
        Command::chat_input(
            CommandMetadata::localized(&translator, "fruit", "fruit.description")?,
            vec![fruit_name],
            fruit,
        )
        .with_autocomplete(suggest_fruits)
        .into(),
        CommandWithSubcommands::new(CommandMetadata::localized(
            &translator,
            "settings",
            "settings.description",
        )?)
        .into(),
        Command::user(
            CommandMetadata::new("", "")
                .with_localized_name(localized_prop(&translator, "name", "avatar")?),
            avatar,
        )
        .into(),
        Command::message(
            CommandMetadata::new("", "")
                .with_localized_name(localized_prop(&translator, "name", "quote")?),
            quote,
        )
        .into(),
    ];

    let mut subcommands: HashMap<String, Vec<Subcommand<Data, Error>>> = HashMap::new();
    subcommands.insert(
        "settings".to_owned(),
        vec![Subcommand::localized(
            &translator,
            "settings-show",
            "settings-show.description",
            Vec::new(),
            show_settings,
        )?],
    );

    let handler = Handler {
        commands,
        subcommands,
        data: Data {
            fruits: vec!["apple", "banana", "cherry", "grape", "mango"],
        },
    };

    let token = std::env::var("DISCORD_TOKEN")?;
    let mut client = serenity::Client::builder(token, serenity::GatewayIntents::empty())
        .event_handler(handler)
        .await?;
    client.start().await?;
    Ok(())
}

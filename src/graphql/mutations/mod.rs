use async_graphql::*;

use crate::bench_file::BenchSettings;
use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::config_error_to_graphql_error;
use crate::graphql::types::{Config, CreateConfig, UpdateConfig};
use crate::services::{ConfigPatch, NewConfig};

pub struct Mutation;

#[Object]
impl Mutation {
    /// Create a new configuration
    #[allow(clippy::too_many_arguments)]
    async fn create_config(
        &self,
        ctx: &Context<'_>,
        name: String,
        is_default: bool,
        number: i32,
        time_between_cycles: i32,
        upper_limit: i32,
        inferior_limit: i32,
        upper_time: i32,
        inferior_time: i32,
        disable_shutdown: bool,
        enable_output: bool,
        temperature: f64,
        time: f64,
    ) -> Result<CreateConfig> {
        let context = ctx.data::<GraphQLContext>()?;
        let input = NewConfig {
            name,
            is_default,
            settings: BenchSettings {
                number,
                time_between_cycles,
                upper_limit,
                inferior_limit,
                upper_time,
                inferior_time,
                disable_shutdown,
                enable_output,
                temperature,
                time,
            },
        };

        let config = context
            .config_service
            .create(input)
            .await
            .map_err(|e| config_error_to_graphql_error("createConfig", e))?;

        Ok(CreateConfig {
            config: Config::from(config),
        })
    }

    /// Update an existing configuration; omitted arguments keep their values
    #[allow(clippy::too_many_arguments)]
    async fn update_config(
        &self,
        ctx: &Context<'_>,
        id: i32,
        name: Option<String>,
        is_default: Option<bool>,
        number: Option<i32>,
        time_between_cycles: Option<i32>,
        upper_limit: Option<i32>,
        inferior_limit: Option<i32>,
        upper_time: Option<i32>,
        inferior_time: Option<i32>,
        disable_shutdown: Option<bool>,
        enable_output: Option<bool>,
        temperature: Option<f64>,
        time: Option<f64>,
    ) -> Result<UpdateConfig> {
        let context = ctx.data::<GraphQLContext>()?;
        let patch = ConfigPatch {
            name,
            is_default,
            number,
            time_between_cycles,
            upper_limit,
            inferior_limit,
            upper_time,
            inferior_time,
            disable_shutdown,
            enable_output,
            temperature,
            time,
        };

        let config = context
            .config_service
            .update(id, patch)
            .await
            .map_err(|e| config_error_to_graphql_error("updateConfig", e))?;

        Ok(UpdateConfig {
            config: Config::from(config),
        })
    }

    /// Delete a configuration
    async fn delete_config(&self, ctx: &Context<'_>, id: i32) -> Result<bool> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .config_service
            .delete(id)
            .await
            .map_err(|e| config_error_to_graphql_error("deleteConfig", e))?;

        Ok(true)
    }

    /// Store a configuration read from a bench file
    async fn import_config(
        &self,
        ctx: &Context<'_>,
        name: String,
        content: String,
        #[graphql(default = false)] is_default: bool,
    ) -> Result<CreateConfig> {
        let context = ctx.data::<GraphQLContext>()?;
        let config = context
            .config_service
            .import(name, is_default, &content)
            .await
            .map_err(|e| config_error_to_graphql_error("importConfig", e))?;

        Ok(CreateConfig {
            config: Config::from(config),
        })
    }
}

use async_graphql::*;

use crate::graphql::context::GraphQLContext;
use crate::graphql::errors::{config_error_to_graphql_error, StructuredError};
use crate::graphql::types::Config;

pub struct Query;

// `configAt` and `config` accept the full column set as arguments so that
// clients written against the older API keep validating. Only `id` and
// `name` select rows; the rest are ignored.
#[Object]
impl Query {
    /// Get all configurations
    async fn all_config(&self, ctx: &Context<'_>) -> Result<Vec<Config>> {
        let context = ctx.data::<GraphQLContext>()?;
        let configs = context
            .config_service
            .list()
            .await
            .map_err(|e| config_error_to_graphql_error("allConfig", e))?;

        Ok(configs.into_iter().map(Config::from).collect())
    }

    /// Get one configuration by primary key
    #[allow(clippy::too_many_arguments)]
    async fn config_at(
        &self,
        ctx: &Context<'_>,
        id: Option<i32>,
        #[graphql(name = "name")] _name: Option<String>,
        #[graphql(name = "isDefault")] _is_default: Option<bool>,
        #[graphql(name = "number")] _number: Option<i32>,
        #[graphql(name = "timeBetweenCycles")] _time_between_cycles: Option<i32>,
        #[graphql(name = "upperLimit")] _upper_limit: Option<i32>,
        #[graphql(name = "inferiorLimit")] _inferior_limit: Option<i32>,
        #[graphql(name = "upperTime")] _upper_time: Option<i32>,
        #[graphql(name = "inferiorTime")] _inferior_time: Option<i32>,
        #[graphql(name = "disableShutdown")] _disable_shutdown: Option<bool>,
        #[graphql(name = "enableOutput")] _enable_output: Option<bool>,
        #[graphql(name = "temperature")] _temperature: Option<f64>,
        #[graphql(name = "Time")] _time: Option<f64>,
    ) -> Result<Option<Config>> {
        let id = id.ok_or_else(|| StructuredError::bad_request("configAt requires an id"))?;
        let context = ctx.data::<GraphQLContext>()?;
        let config = context
            .config_service
            .get(id)
            .await
            .map_err(|e| config_error_to_graphql_error("configAt", e))?;

        Ok(Some(Config::from(config)))
    }

    /// Get one configuration by name
    #[allow(clippy::too_many_arguments)]
    async fn config(
        &self,
        ctx: &Context<'_>,
        #[graphql(name = "id")] _id: Option<i32>,
        name: Option<String>,
        #[graphql(name = "isDefault")] _is_default: Option<bool>,
        #[graphql(name = "number")] _number: Option<i32>,
        #[graphql(name = "timeBetweenCycles")] _time_between_cycles: Option<i32>,
        #[graphql(name = "upperLimit")] _upper_limit: Option<i32>,
        #[graphql(name = "inferiorLimit")] _inferior_limit: Option<i32>,
        #[graphql(name = "upperTime")] _upper_time: Option<i32>,
        #[graphql(name = "inferiorTime")] _inferior_time: Option<i32>,
        #[graphql(name = "disableShutdown")] _disable_shutdown: Option<bool>,
        #[graphql(name = "enableOutput")] _enable_output: Option<bool>,
        #[graphql(name = "temperature")] _temperature: Option<f64>,
        #[graphql(name = "Time")] _time: Option<f64>,
    ) -> Result<Option<Config>> {
        let name = name.ok_or_else(|| StructuredError::bad_request("config requires a name"))?;
        let context = ctx.data::<GraphQLContext>()?;
        let config = context
            .config_service
            .get_by_name(&name)
            .await
            .map_err(|e| config_error_to_graphql_error("config", e))?;

        Ok(Some(Config::from(config)))
    }

    /// The newest configuration flagged as default
    async fn default_config(&self, ctx: &Context<'_>) -> Result<Option<Config>> {
        let context = ctx.data::<GraphQLContext>()?;
        let config = context
            .config_service
            .default_config()
            .await
            .map_err(|e| config_error_to_graphql_error("defaultConfig", e))?;

        Ok(config.map(Config::from))
    }

    /// Render a configuration as a bench file
    async fn config_file(&self, ctx: &Context<'_>, id: i32) -> Result<String> {
        let context = ctx.data::<GraphQLContext>()?;
        context
            .config_service
            .export(id)
            .await
            .map_err(|e| config_error_to_graphql_error("configFile", e))
    }
}

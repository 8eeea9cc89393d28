mod cell_properties;
mod pipeline_scenarios;
mod volume_conservation;

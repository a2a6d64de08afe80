mod grid_scenarios;

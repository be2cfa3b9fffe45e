mod format_output_path;

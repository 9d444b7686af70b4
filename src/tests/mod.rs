mod virtual_path;
